use thiserror::Error;

#[derive(Error, Debug)]
pub enum CiError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Required tool '{0}' was not found on PATH")]
    ToolMissing(String),

    #[error("Build failed for project '{project}' (exit code {code})")]
    BuildFailed { project: String, code: i32 },

    #[error("Unit tests failed (exit code {0})")]
    UnitTestsFailed(i32),

    #[error("Integration suite '{suite}' failed: '{service}' exited with code {code}")]
    IntegrationTestsFailed {
        suite: String,
        service: String,
        code: i32,
    },

    #[error("Docker error: {0}")]
    DockerError(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Command timed out after {0} seconds: {1}")]
    CommandTimeout(u64, String),

    #[error("Another CI run is already in progress (lock file: {0})")]
    RunInProgress(String),

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("{0} pipeline step(s) failed")]
    StepsFailed(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CiError>;
