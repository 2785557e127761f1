// Run summary and test-report handling

use crate::errors::{CiError, Result};
use chrono::Utc;
use colored::Colorize;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
    Passed,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub name: String,
    pub outcome: StepOutcome,
    pub duration_ms: u64,
}

/// Machine-readable record of one driver invocation, written next to the
/// test reports so CI can archive both together.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub started_at: String,
    pub finished_at: Option<String>,
    pub success: bool,
    pub steps: Vec<StepRecord>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now().to_rfc3339(),
            finished_at: None,
            success: false,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, name: impl Into<String>, outcome: StepOutcome, duration: Duration) {
        self.steps.push(StepRecord {
            name: name.into(),
            outcome,
            duration_ms: duration.as_millis() as u64,
        });
    }

    pub fn finish(&mut self, success: bool) {
        self.finished_at = Some(Utc::now().to_rfc3339());
        self.success = success;
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CiError::ReportError(format!("Failed to serialize run summary: {}", e)))?;
        fs::write(path, json)?;

        Ok(())
    }

    pub fn print(&self) {
        println!();
        println!("{:<55} {:<8} {:>10}", "STEP", "RESULT", "DURATION");
        println!("{}", "-".repeat(75));

        for step in &self.steps {
            let result = match step.outcome {
                StepOutcome::Passed => "passed".green(),
                StepOutcome::Failed => "failed".red(),
                StepOutcome::Skipped => "skipped".yellow(),
            };
            println!(
                "{:<55} {:<8} {:>9}s",
                step.name,
                result,
                step.duration_ms / 1000
            );
        }

        println!();
        if self.success {
            println!("{}", "✓ Pipeline passed".green());
        } else {
            println!("{}", "✗ Pipeline failed".red());
        }
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts pulled out of the `dotnet test` console summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestSummary {
    pub failed: u32,
    pub passed: u32,
    pub skipped: u32,
    pub total: u32,
}

impl TestSummary {
    /// Parse the first VSTest summary line, e.g.
    /// `Passed!  - Failed:     0, Passed:    42, Skipped:     0, Total:    42, Duration: 1 s`
    pub fn parse(output: &str) -> Option<Self> {
        let re =
            Regex::new(r"Failed:\s*(\d+),\s*Passed:\s*(\d+),\s*Skipped:\s*(\d+),\s*Total:\s*(\d+)")
                .ok()?;
        let caps = re.captures(output)?;

        Some(Self {
            failed: caps.get(1)?.as_str().parse().ok()?,
            passed: caps.get(2)?.as_str().parse().ok()?,
            skipped: caps.get(3)?.as_str().parse().ok()?,
            total: caps.get(4)?.as_str().parse().ok()?,
        })
    }

    pub fn print(&self) {
        let line = format!(
            "{} passed, {} failed, {} skipped ({} total)",
            self.passed, self.failed, self.skipped, self.total
        );
        if self.failed == 0 {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE_OUTPUT: &str = "\
Starting test execution, please wait...
A total of 1 test files matched the specified pattern.

Passed!  - Failed:     0, Passed:    42, Skipped:     2, Total:    44, Duration: 1 s - Uptick.Platform.PubSub.Sdk.Tests.dll (net6.0)
";

    #[test]
    fn test_parse_summary_line() {
        let summary = TestSummary::parse(SAMPLE_OUTPUT).unwrap();
        assert_eq!(
            summary,
            TestSummary {
                failed: 0,
                passed: 42,
                skipped: 2,
                total: 44,
            }
        );
    }

    #[test]
    fn test_parse_failing_summary_line() {
        let output = "Failed!  - Failed:     3, Passed:    10, Skipped:     0, Total:    13, Duration: 2 s";
        let summary = TestSummary::parse(output).unwrap();
        assert_eq!(summary.failed, 3);
        assert_eq!(summary.total, 13);
    }

    #[test]
    fn test_parse_absent_summary() {
        assert!(TestSummary::parse("error MSB1009: Project file does not exist.").is_none());
    }

    #[test]
    fn test_summary_roundtrips_to_json() {
        let mut summary = RunSummary::new();
        summary.record(
            "build Uptick.Platform.PubSub.Sdk.Tests -> ./obj/Docker/publish",
            StepOutcome::Passed,
            Duration::from_millis(1500),
        );
        summary.record("unit tests (with report)", StepOutcome::Failed, Duration::ZERO);
        summary.finish(false);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("ci-summary.json");
        summary.write(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["steps"].as_array().unwrap().len(), 2);
        assert_eq!(json["steps"][0]["outcome"], "passed");
        assert_eq!(json["steps"][0]["duration_ms"], 1500);
        assert_eq!(json["steps"][1]["outcome"], "failed");
    }
}
