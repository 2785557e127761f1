// .NET build-tools integration
// Publishing test projects, running unit tests with a TRX report, and
// driving compose-based integration suites

pub mod compose;
pub mod toolchain;

pub use toolchain::DotnetCli;

use crate::errors::Result;

/// Operations the pipeline needs from the underlying build toolchain.
///
/// The driver is written against this trait so a whole run can be exercised
/// in tests with a recording double instead of a .NET SDK install.
pub trait BuildTools {
    /// Publish a single project into the given output path.
    fn build(&self, project: &str, output: &str) -> Result<()>;

    /// Run the unit test suites, leaving a machine-readable report behind.
    fn run_unit_tests_with_report(&self) -> Result<()>;

    /// Run an integration suite inside a compose environment assembled from
    /// the base and override files, watching the test image for its verdict.
    fn run_integration_tests(
        &self,
        suite: &str,
        image: &str,
        compose_file: &str,
        override_file: &str,
    ) -> Result<()>;
}
