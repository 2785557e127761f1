use clap::{Parser, Subcommand};

use uptick_ci::cli;
use uptick_ci::errors::Result;

#[derive(Parser)]
#[command(name = "ci")]
#[command(about = "CI driver for the Uptick PubSub SDK", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: builds, unit tests, integration tests
    Run {
        /// Keep executing later steps after a failure
        #[arg(long)]
        keep_going: bool,
        /// Stop after the unit test step
        #[arg(long)]
        skip_integration: bool,
    },
    /// Build the configured test projects
    Build {
        /// Build only this project
        project: Option<String>,
    },
    /// Run unit tests and write the TRX report
    UnitTests,
    /// Run the compose-based integration suite
    IntegrationTests,
    /// Print the resolved pipeline without executing it
    Plan,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            keep_going,
            skip_integration,
        } => cli::run::run(keep_going, skip_integration)?,
        Commands::Build { project } => cli::build::run(project)?,
        Commands::UnitTests => cli::unit_tests::run()?,
        Commands::IntegrationTests => cli::integration::run()?,
        Commands::Plan => cli::plan::run()?,
    }

    Ok(())
}
