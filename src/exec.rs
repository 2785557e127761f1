// External process execution with timeout and output capture
//
// Build and test tools can produce megabytes of output; piping that through
// the parent would deadlock once the pipe buffer fills. Output is therefore
// redirected to temp files and read back after the process exits.

use crate::clock::Clock;
use crate::errors::{CiError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::Duration;

/// Captured result of a finished process.
#[derive(Debug)]
pub struct CapturedOutput {
    pub code: i32,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

/// Check whether a tool responds on PATH (e.g. `dotnet --version`).
pub fn probe(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Render a command line for log and error messages.
pub fn display(program: &str, args: &[String]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().cloned());
    parts.join(" ")
}

/// Return the last `max_lines` lines of a command's output.
pub fn tail(output: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}

/// Run a command to completion, killing it if it exceeds `timeout`.
pub fn run_with_timeout(
    program: &str,
    args: &[String],
    cwd: &Path,
    timeout: Duration,
    clock: &Arc<dyn Clock>,
) -> Result<CapturedOutput> {
    let stdout_file = tempfile::NamedTempFile::new().map_err(|e| {
        CiError::CommandFailed(format!("Failed to create temp file for stdout: {}", e))
    })?;
    let stderr_file = tempfile::NamedTempFile::new().map_err(|e| {
        CiError::CommandFailed(format!("Failed to create temp file for stderr: {}", e))
    })?;

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdout(File::create(stdout_file.path())?)
        .stderr(File::create(stderr_file.path())?)
        .spawn()
        .map_err(|e| {
            CiError::CommandFailed(format!("Failed to spawn '{}': {}", display(program, args), e))
        })?;

    let start = clock.now();
    let poll_interval = Duration::from_millis(100);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let mut stdout = String::new();
                let mut stderr = String::new();
                File::open(stdout_file.path())?.read_to_string(&mut stdout)?;
                File::open(stderr_file.path())?.read_to_string(&mut stderr)?;

                return Ok(CapturedOutput {
                    code: status.code().unwrap_or(-1),
                    success: status.success(),
                    stdout,
                    stderr,
                    duration: clock.now().saturating_duration_since(start),
                });
            }
            Ok(None) => {
                if clock.now().saturating_duration_since(start) >= timeout {
                    // Kill and reap; the process may have exited in the
                    // meantime, in which case the kill error is ignorable.
                    let _ = child.kill();
                    let _ = child.wait();

                    return Err(CiError::CommandTimeout(
                        timeout.as_secs(),
                        display(program, args),
                    ));
                }
                clock.sleep(poll_interval);
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(CiError::Io(e));
            }
        }
    }
}
