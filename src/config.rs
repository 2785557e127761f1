use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name looked up at the project root.
pub const CONFIG_FILE: &str = ".uptick-ci.yml";

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    pub build: BuildConfig,
    pub unit_tests: UnitTestsConfig,
    pub integration: IntegrationConfig,
    /// Per-step timeout. Builds and test runs that exceed it are killed.
    pub timeout_seconds: u64,
    /// Directory (relative to the project root) for reports and the run lock.
    pub results_dir: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BuildConfig {
    /// Projects published in order, one build step each.
    pub projects: Vec<String>,
    /// Shared publish output path, passed to every build.
    pub output: String,
    pub configuration: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct UnitTestsConfig {
    /// TRX report file name, written under the results directory.
    pub report: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct IntegrationConfig {
    pub suite: String,
    /// Test image; also the compose service whose exit code decides the run.
    pub image: String,
    pub compose_file: String,
    pub override_file: String,
    /// Tear the compose environment down after the run.
    pub teardown: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            unit_tests: UnitTestsConfig::default(),
            integration: IntegrationConfig::default(),
            timeout_seconds: 1800,
            results_dir: "test-results".to_string(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            projects: vec![
                "Uptick.Platform.PubSub.Sdk.Tests".to_string(),
                "Uptick.Platform.PubSub.Sdk.Extenstions.Tests".to_string(),
                "Uptick.Platform.PubSub.Sdk.RabbitMQ.Tests".to_string(),
                "Uptick.Platform.PubSub.Sdk.Management.RabbitMQ.Tests".to_string(),
                "Uptick.Platform.PubSub.Sdk.ComponentTests".to_string(),
            ],
            output: "./obj/Docker/publish".to_string(),
            configuration: "Release".to_string(),
        }
    }
}

impl Default for UnitTestsConfig {
    fn default() -> Self {
        Self {
            report: "unit-tests.trx".to_string(),
        }
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            suite: "PubSub".to_string(),
            image: "uptick.platform.pubsub.sdk.componenttests".to_string(),
            compose_file: "docker-compose.yml".to_string(),
            override_file: "docker-compose.tests.yml".to_string(),
            teardown: true,
        }
    }
}

impl Config {
    /// Load config from `.uptick-ci.yml` in the project root.
    ///
    /// A missing file is not an error: the defaults describe the canonical
    /// PubSub pipeline, so a bare checkout runs unchanged.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_yml::from_str(&content).map_err(|e| {
            crate::errors::CiError::ConfigError(format!("Failed to parse config: {}", e))
        })?;

        Ok(config)
    }

    /// Find the project root by walking up from `start_path` looking for the
    /// config file or a `.git` directory. Falls back to `start_path` so the
    /// driver still runs in a bare directory of sources.
    pub fn find_project_root(start_path: &Path) -> PathBuf {
        let mut current = start_path;

        loop {
            if current.join(CONFIG_FILE).exists() || current.join(".git").exists() {
                return current.to_path_buf();
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return start_path.to_path_buf(),
            }
        }
    }
}
