//! Host startup
//!
//! Loads configuration, installs logging, wires the container from the
//! link-time registrations and drives the navigation host with a script.
//! Every scope is unwound before returning, even when a command fails.

use std::path::Path;

use arch_infrastructure::config::{AppConfig, ConfigLoader};
use arch_infrastructure::logging::init_logging;
use arch_infrastructure::{ErrorContext, init_app};
use tokio::io::AsyncReadExt;
use tracing::{error, info};

use crate::host::NavHost;
use crate::script::{ScriptRunner, parse_script};

/// Run a navigation script and print each rendered screen to stdout
pub async fn run(
    config_path: Option<&Path>,
    script_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    init_logging(config.logging.clone())?;

    let commands = parse_script(&read_script(script_path).await?)?;
    info!(commands = commands.len(), "script loaded");

    let container = init_app(config)?;
    let mut runner = ScriptRunner::new(NavHost::start(container)?);

    let mut outcome = Ok(());
    for command in &commands {
        match runner.execute(command).await {
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(e) => {
                error!(command = %command, error = %e, "command failed");
                outcome = Err(e);
                break;
            }
        }
    }

    let report = runner.finish().await;
    for failure in report.errors() {
        error!(error = %failure, "teardown failure");
    }
    outcome?;
    Ok(())
}

fn load_config(config_path: Option<&Path>) -> arch_domain::Result<AppConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

async fn read_script(script_path: Option<&Path>) -> arch_domain::Result<String> {
    match script_path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .io_context(format!("Failed to read script: {}", path.display())),
        None => {
            let mut script = String::new();
            tokio::io::stdin()
                .read_to_string(&mut script)
                .await
                .io_context("Failed to read script from stdin")?;
            Ok(script)
        }
    }
}
