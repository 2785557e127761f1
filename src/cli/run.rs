use crate::config::Config;
use crate::dotnet::DotnetCli;
use crate::errors::Result;
use crate::lock::RunLock;
use crate::pipeline::Pipeline;
use crate::report::RunSummary;
use colored::Colorize;
use std::env;

/// Run the full pipeline: five builds, unit tests with report, then the
/// compose-based integration suite.
pub fn run(keep_going: bool, skip_integration: bool) -> Result<()> {
    let root = Config::find_project_root(&env::current_dir()?);
    let config = Config::load(&root)?;
    let results_dir = root.join(&config.results_dir);

    let _lock = RunLock::acquire(&results_dir)?;

    let tools = DotnetCli::new(&root, &config)?;
    let mut pipeline = Pipeline::from_config(&config);
    if skip_integration {
        pipeline = pipeline.skip_integration();
    }

    println!(
        "Running CI pipeline in {} ({} steps)\n",
        root.display(),
        pipeline.plan().len()
    );

    let mut summary = RunSummary::new();
    let result = pipeline.run(&tools, &mut summary, keep_going);

    summary.finish(result.is_ok());
    summary.print();

    let summary_path = results_dir.join("ci-summary.json");
    match summary.write(&summary_path) {
        Ok(()) => println!("{}", format!("Summary: {}", summary_path.display()).dimmed()),
        Err(e) => eprintln!("Warning: failed to write run summary: {}", e),
    }

    result
}
