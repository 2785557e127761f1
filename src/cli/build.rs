use crate::config::Config;
use crate::dotnet::{BuildTools, DotnetCli};
use crate::errors::{CiError, Result};
use colored::Colorize;
use std::env;

/// Build every configured project, or just the one named.
pub fn run(project: Option<String>) -> Result<()> {
    let root = Config::find_project_root(&env::current_dir()?);
    let config = Config::load(&root)?;
    let tools = DotnetCli::new(&root, &config)?;

    let projects: Vec<&String> = match &project {
        Some(name) => {
            if !config.build.projects.contains(name) {
                return Err(CiError::ConfigError(format!(
                    "Project '{}' is not in the build list. Configured projects: {}",
                    name,
                    config.build.projects.join(", ")
                )));
            }
            config
                .build
                .projects
                .iter()
                .filter(|p| *p == name)
                .collect()
        }
        None => config.build.projects.iter().collect(),
    };

    for project in projects {
        println!("Building '{}'...", project);
        tools.build(project, &config.build.output)?;
        println!("{}", format!("✓ Built '{}'", project).green());
    }

    Ok(())
}
