use crate::config::Config;
use crate::dotnet::{BuildTools, DotnetCli};
use crate::errors::Result;
use colored::Colorize;
use std::env;

/// Run the integration suite on its own.
pub fn run() -> Result<()> {
    let root = Config::find_project_root(&env::current_dir()?);
    let config = Config::load(&root)?;
    let tools = DotnetCli::new(&root, &config)?;

    println!(
        "Running integration suite '{}' ({})...",
        config.integration.suite, config.integration.image
    );
    tools.run_integration_tests(
        &config.integration.suite,
        &config.integration.image,
        &config.integration.compose_file,
        &config.integration.override_file,
    )?;
    println!(
        "{}",
        format!("✓ Integration suite '{}' passed", config.integration.suite).green()
    );

    Ok(())
}
