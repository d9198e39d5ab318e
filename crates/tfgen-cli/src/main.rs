mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tfgen_engine::Orchestrator;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        commands::completions::handle(shell);
        return Ok(());
    }

    let config = commands::load_config(cli.config.as_deref())?;
    let orchestrator = Arc::new(Orchestrator::from_config(&config)?);

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            commands::serve::handle(orchestrator, &host, port).await
        }
        Commands::Generate {
            prompt,
            location,
            resource_group,
            no_pr,
            json,
        } => {
            commands::generate::handle(&orchestrator, prompt, location, resource_group, !no_pr, json)
                .await
        }
        Commands::Publish {
            file,
            description,
            location,
            no_pr,
            json,
        } => {
            commands::publish::handle(&orchestrator, &file, description, location, !no_pr, json)
                .await
        }
        Commands::Status { pr_number, json } => {
            commands::status::handle(&orchestrator, pr_number, json).await
        }
        Commands::Templates { json } => commands::templates::handle(&orchestrator, json),
        Commands::Completions { .. } => Ok(()),
    }
}
