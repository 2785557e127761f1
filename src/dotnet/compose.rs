// Docker Compose integration-suite runner
// Brings the environment up from the base + override files, takes the
// verdict from the test service's exit code, tears everything down after

use crate::clock::Clock;
use crate::errors::{CiError, Result};
use crate::exec;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Docker Compose command variant
#[derive(Debug, Clone, Copy)]
enum ComposeVariant {
    /// Legacy docker-compose (with hyphen)
    Hyphenated,
    /// Modern docker compose (no hyphen, subcommand of docker)
    Subcommand,
}

/// Runs one integration suite against a compose environment.
pub struct ComposeRunner {
    root: PathBuf,
    variant: ComposeVariant,
    teardown: bool,
    timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl ComposeRunner {
    pub fn new(root: PathBuf, teardown: bool, timeout: Duration, clock: Arc<dyn Clock>) -> Self {
        let variant = Self::detect_compose_variant();
        Self {
            root,
            variant,
            teardown,
            timeout,
            clock,
        }
    }

    /// Detect which docker-compose variant is available
    fn detect_compose_variant() -> ComposeVariant {
        // Try modern "docker compose" first
        if exec::probe("docker", &["compose", "version"]) {
            return ComposeVariant::Subcommand;
        }

        // Fall back to legacy "docker-compose"
        ComposeVariant::Hyphenated
    }

    /// Check if Docker is available on the system
    pub fn is_docker_available(&self) -> bool {
        exec::probe("docker", &["--version"])
    }

    /// Get the compose command and args based on the detected variant
    fn compose_command(&self, args: &[String]) -> (String, Vec<String>) {
        match self.variant {
            ComposeVariant::Subcommand => {
                let mut compose_args = vec!["compose".to_string()];
                compose_args.extend_from_slice(args);
                ("docker".to_string(), compose_args)
            }
            ComposeVariant::Hyphenated => ("docker-compose".to_string(), args.to_vec()),
        }
    }

    /// Compose project name derived from the suite label.
    /// Project names must be lowercase alphanumeric with hyphens only.
    pub fn project_name(suite: &str) -> String {
        let sanitized = suite
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>();

        // Remove leading/trailing hyphens and collapse runs of hyphens
        sanitized
            .trim_matches('-')
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Build `up` arguments. The test image doubles as the compose service
    /// name; its exit code is the suite verdict.
    fn up_args(suite: &str, image: &str, compose_file: &str, override_file: &str) -> Vec<String> {
        vec![
            "-p".to_string(),
            Self::project_name(suite),
            "-f".to_string(),
            compose_file.to_string(),
            "-f".to_string(),
            override_file.to_string(),
            "up".to_string(),
            "--build".to_string(),
            "--abort-on-container-exit".to_string(),
            "--exit-code-from".to_string(),
            image.to_string(),
        ]
    }

    fn down_args(suite: &str, compose_file: &str, override_file: &str) -> Vec<String> {
        vec![
            "-p".to_string(),
            Self::project_name(suite),
            "-f".to_string(),
            compose_file.to_string(),
            "-f".to_string(),
            override_file.to_string(),
            "down".to_string(),
            "-v".to_string(),
        ]
    }

    /// Run the suite to completion and translate the exit code.
    pub fn run_suite(
        &self,
        suite: &str,
        image: &str,
        compose_file: &str,
        override_file: &str,
    ) -> Result<()> {
        if !self.is_docker_available() {
            return Err(CiError::DockerError(
                "Docker is not available. Please install Docker.".to_string(),
            ));
        }

        for file in [compose_file, override_file] {
            if !self.root.join(file).exists() {
                return Err(CiError::DockerError(format!(
                    "Compose file '{}' not found in {}",
                    file,
                    self.root.display()
                )));
            }
        }

        let result = self.run_up(suite, image, compose_file, override_file);

        // Teardown runs even when the suite failed; a failed run must not
        // leave containers holding ports and volumes.
        if self.teardown {
            if let Err(e) = self.run_down(suite, compose_file, override_file) {
                eprintln!("Warning: compose teardown failed: {}", e);
            }
        }

        result
    }

    fn run_up(
        &self,
        suite: &str,
        image: &str,
        compose_file: &str,
        override_file: &str,
    ) -> Result<()> {
        let args = Self::up_args(suite, image, compose_file, override_file);
        let (program, full_args) = self.compose_command(&args);

        let output = exec::run_with_timeout(
            &program,
            &full_args,
            &self.root,
            self.timeout,
            &self.clock,
        )?;

        if !output.success {
            eprintln!("{}", exec::tail(&output.stderr, 40));
            return Err(CiError::IntegrationTestsFailed {
                suite: suite.to_string(),
                service: image.to_string(),
                code: output.code,
            });
        }

        Ok(())
    }

    fn run_down(&self, suite: &str, compose_file: &str, override_file: &str) -> Result<()> {
        let args = Self::down_args(suite, compose_file, override_file);
        let (program, full_args) = self.compose_command(&args);

        let output = exec::run_with_timeout(
            &program,
            &full_args,
            &self.root,
            self.timeout,
            &self.clock,
        )?;

        if !output.success {
            return Err(CiError::DockerError(format!(
                "compose down exited with code {}",
                output.code
            )));
        }

        Ok(())
    }
}
