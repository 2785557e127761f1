use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::dotnet::compose::ComposeRunner;
use crate::dotnet::BuildTools;
use crate::errors::{CiError, Result};
use crate::exec;
use crate::report::TestSummary;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Real `BuildTools` backed by the `dotnet` CLI and Docker Compose.
pub struct DotnetCli {
    root: PathBuf,
    configuration: String,
    results_dir: PathBuf,
    report: String,
    timeout: Duration,
    clock: Arc<dyn Clock>,
    compose: ComposeRunner,
}

impl DotnetCli {
    pub fn new(root: &Path, config: &Config) -> Result<Self> {
        Self::new_with_clock(root, config, Arc::new(SystemClock))
    }

    pub fn new_with_clock(root: &Path, config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        if !exec::probe("dotnet", &["--version"]) {
            return Err(CiError::ToolMissing("dotnet".to_string()));
        }

        let timeout = Duration::from_secs(config.timeout_seconds);
        let compose = ComposeRunner::new(
            root.to_path_buf(),
            config.integration.teardown,
            timeout,
            clock.clone(),
        );

        Ok(Self {
            root: root.to_path_buf(),
            configuration: config.build.configuration.clone(),
            results_dir: root.join(&config.results_dir),
            report: config.unit_tests.report.clone(),
            timeout,
            clock,
            compose,
        })
    }
}

impl BuildTools for DotnetCli {
    fn build(&self, project: &str, output: &str) -> Result<()> {
        let args = vec![
            "publish".to_string(),
            project.to_string(),
            "-c".to_string(),
            self.configuration.clone(),
            "-o".to_string(),
            output.to_string(),
        ];

        let out = exec::run_with_timeout("dotnet", &args, &self.root, self.timeout, &self.clock)?;

        if !out.success {
            eprintln!("{}", exec::tail(&out.stderr, 40));
            eprintln!("{}", exec::tail(&out.stdout, 40));
            return Err(CiError::BuildFailed {
                project: project.to_string(),
                code: out.code,
            });
        }

        Ok(())
    }

    fn run_unit_tests_with_report(&self) -> Result<()> {
        fs::create_dir_all(&self.results_dir)?;

        let args = vec![
            "test".to_string(),
            "--logger".to_string(),
            format!("trx;LogFileName={}", self.report),
            "--results-directory".to_string(),
            self.results_dir.display().to_string(),
        ];

        let out = exec::run_with_timeout("dotnet", &args, &self.root, self.timeout, &self.clock)?;

        if let Some(summary) = TestSummary::parse(&out.stdout) {
            summary.print();
        }

        if !out.success {
            eprintln!("{}", exec::tail(&out.stdout, 40));
            return Err(CiError::UnitTestsFailed(out.code));
        }

        println!(
            "{}",
            format!("Report: {}", self.results_dir.join(&self.report).display()).dimmed()
        );

        Ok(())
    }

    fn run_integration_tests(
        &self,
        suite: &str,
        image: &str,
        compose_file: &str,
        override_file: &str,
    ) -> Result<()> {
        self.compose
            .run_suite(suite, image, compose_file, override_file)
    }
}
