// The CI driver core: a fixed, ordered step list
//
// The plan is fully resolved before anything runs, so `ci plan` and the
// call-order tests see exactly what an execution would do. Two runs over
// the same config always produce the same sequence.

use crate::config::Config;
use crate::dotnet::BuildTools;
use crate::errors::{CiError, Result};
use crate::report::{RunSummary, StepOutcome};
use colored::Colorize;
use std::time::{Duration, Instant};

/// One resolved pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
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

impl Step {
    pub fn describe(&self) -> String {
        match self {
            Step::Build { project, output } => format!("build {} -> {}", project, output),
            Step::UnitTests => "unit tests (with report)".to_string(),
            Step::IntegrationTests { suite, image, .. } => {
                format!("integration tests '{}' ({})", suite, image)
            }
        }
    }
}

pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    /// Resolve the step list from config: one build per project, then the
    /// unit test run, then the integration suite.
    pub fn from_config(config: &Config) -> Self {
        let mut steps = Vec::with_capacity(config.build.projects.len() + 2);

        for project in &config.build.projects {
            steps.push(Step::Build {
                project: project.clone(),
                output: config.build.output.clone(),
            });
        }

        steps.push(Step::UnitTests);

        steps.push(Step::IntegrationTests {
            suite: config.integration.suite.clone(),
            image: config.integration.image.clone(),
            compose_file: config.integration.compose_file.clone(),
            override_file: config.integration.override_file.clone(),
        });

        Self { steps }
    }

    /// Drop the integration step (`--skip-integration`).
    pub fn skip_integration(mut self) -> Self {
        self.steps
            .retain(|step| !matches!(step, Step::IntegrationTests { .. }));
        self
    }

    pub fn plan(&self) -> &[Step] {
        &self.steps
    }

    /// Execute the plan in order. By default the first failure aborts the
    /// run and the remaining steps are recorded as skipped; with
    /// `keep_going` every step still runs and the aggregate result is
    /// reported at the end.
    pub fn run(
        &self,
        tools: &dyn BuildTools,
        summary: &mut RunSummary,
        keep_going: bool,
    ) -> Result<()> {
        let total = self.steps.len();
        let mut failed = 0usize;
        let mut first_err: Option<CiError> = None;

        for (index, step) in self.steps.iter().enumerate() {
            if failed > 0 && !keep_going {
                summary.record(step.describe(), StepOutcome::Skipped, Duration::ZERO);
                continue;
            }

            println!(
                "{}",
                format!("[{}/{}] {}", index + 1, total, step.describe()).bold()
            );

            let start = Instant::now();
            let result = match step {
                Step::Build { project, output } => tools.build(project, output),
                Step::UnitTests => tools.run_unit_tests_with_report(),
                Step::IntegrationTests {
                    suite,
                    image,
                    compose_file,
                    override_file,
                } => tools.run_integration_tests(suite, image, compose_file, override_file),
            };
            let elapsed = start.elapsed();

            match result {
                Ok(()) => {
                    summary.record(step.describe(), StepOutcome::Passed, elapsed);
                    println!("{}", format!("✓ {}", step.describe()).green());
                }
                Err(e) => {
                    failed += 1;
                    summary.record(step.describe(), StepOutcome::Failed, elapsed);
                    eprintln!("{}", format!("✗ {}", e).red());
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }

        match first_err {
            None => Ok(()),
            Some(err) if !keep_going => Err(err),
            Some(_) => Err(CiError::StepsFailed(failed)),
        }
    }
}
