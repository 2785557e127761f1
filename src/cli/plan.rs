use crate::config::Config;
use crate::errors::Result;
use crate::pipeline::Pipeline;
use std::env;

/// Print the resolved pipeline without executing anything.
pub fn run() -> Result<()> {
    let root = Config::find_project_root(&env::current_dir()?);
    let config = Config::load(&root)?;
    let pipeline = Pipeline::from_config(&config);

    println!(
        "CI pipeline for {} ({} steps):",
        root.display(),
        pipeline.plan().len()
    );
    for (index, step) in pipeline.plan().iter().enumerate() {
        println!("  {}. {}", index + 1, step.describe());
    }

    Ok(())
}
