/// Common test utilities for uptick-ci integration tests
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use uptick_ci::dotnet::BuildTools;
use uptick_ci::errors::{CiError, Result};

/// A scratch project directory with config file management
#[allow(dead_code)]
pub struct TestProject {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("project");
        fs::create_dir(&root).expect("Failed to create project directory");

        TestProject { temp_dir, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn create_config(&self, yaml: &str) {
        fs::write(self.root.join(".uptick-ci.yml"), yaml).expect("Failed to write config");
    }
}

/// One observed call on the build-tools boundary
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    Build {
        project: String,
        output: String,
    },
    UnitTests,
    IntegrationTests {
        suite: String,
        image: String,
        compose_file: String,
        override_file: String,
    },
}

/// Recording double for the build-tools boundary, with optional failure
/// injection per step kind
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingTools {
    pub calls: RefCell<Vec<ToolCall>>,
    pub fail_project: Option<String>,
    pub fail_unit_tests: bool,
    pub fail_integration: bool,
}

#[allow(dead_code)]
impl RecordingTools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_build(project: &str) -> Self {
        Self {
            fail_project: Some(project.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.borrow().clone()
    }
}

impl BuildTools for RecordingTools {
    fn build(&self, project: &str, output: &str) -> Result<()> {
        self.calls.borrow_mut().push(ToolCall::Build {
            project: project.to_string(),
            output: output.to_string(),
        });

        match &self.fail_project {
            Some(name) if name == project => Err(CiError::BuildFailed {
                project: project.to_string(),
                code: 1,
            }),
            _ => Ok(()),
        }
    }

    fn run_unit_tests_with_report(&self) -> Result<()> {
        self.calls.borrow_mut().push(ToolCall::UnitTests);

        if self.fail_unit_tests {
            Err(CiError::UnitTestsFailed(1))
        } else {
            Ok(())
        }
    }

    fn run_integration_tests(
        &self,
        suite: &str,
        image: &str,
        compose_file: &str,
        override_file: &str,
    ) -> Result<()> {
        self.calls.borrow_mut().push(ToolCall::IntegrationTests {
            suite: suite.to_string(),
            image: image.to_string(),
            compose_file: compose_file.to_string(),
            override_file: override_file.to_string(),
        });

        if self.fail_integration {
            Err(CiError::IntegrationTestsFailed {
                suite: suite.to_string(),
                service: image.to_string(),
                code: 1,
            })
        } else {
            Ok(())
        }
    }
}

/// The canonical call log: five builds, unit tests, integration tests.
#[allow(dead_code)]
pub fn canonical_calls() -> Vec<ToolCall> {
    let output = "./obj/Docker/publish".to_string();
    vec![
        ToolCall::Build {
            project: "Uptick.Platform.PubSub.Sdk.Tests".to_string(),
            output: output.clone(),
        },
        ToolCall::Build {
            project: "Uptick.Platform.PubSub.Sdk.Extenstions.Tests".to_string(),
            output: output.clone(),
        },
        ToolCall::Build {
            project: "Uptick.Platform.PubSub.Sdk.RabbitMQ.Tests".to_string(),
            output: output.clone(),
        },
        ToolCall::Build {
            project: "Uptick.Platform.PubSub.Sdk.Management.RabbitMQ.Tests".to_string(),
            output: output.clone(),
        },
        ToolCall::Build {
            project: "Uptick.Platform.PubSub.Sdk.ComponentTests".to_string(),
            output,
        },
        ToolCall::UnitTests,
        ToolCall::IntegrationTests {
            suite: "PubSub".to_string(),
            image: "uptick.platform.pubsub.sdk.componenttests".to_string(),
            compose_file: "docker-compose.yml".to_string(),
            override_file: "docker-compose.tests.yml".to_string(),
        },
    ]
}
