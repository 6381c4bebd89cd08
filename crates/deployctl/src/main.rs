use anyhow::Result;
use clap::Parser;
use deployctl_core::config::Config;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;

use cli::{Cli, Commands};
use connection::ConnectionManager;
use error::CliError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level
    init_tracing(cli.verbose);

    let result = match load_connection_manager(&cli) {
        Ok(mut conn_mgr) => execute_command(&cli, &mut conn_mgr).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        eprintln!("{}", e.display_with_suggestions());
        std::process::exit(1);
    }

    Ok(())
}

fn load_connection_manager(cli: &Cli) -> Result<ConnectionManager, CliError> {
    let config = if let Some(path) = &cli.config_file {
        debug!("Loading config from explicit path: {:?}", path);
        Config::load_from_path(path)?
    } else {
        debug!("Loading config from default location");
        Config::load()?
    };
    Ok(ConnectionManager::with_config_path(
        config,
        cli.config_file.clone(),
    ))
}

fn init_tracing(verbose: u8) {
    // Check for RUST_LOG env var first, then fall back to verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "deployctl=warn,deployctl_core=warn",
            1 => "deployctl=info,deployctl_core=info",
            2 => "deployctl=debug,deployctl_core=debug",
            _ => "deployctl=trace,deployctl_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli, conn_mgr: &mut ConnectionManager) -> Result<(), CliError> {
    match &cli.command {
        Commands::Profile(command) => {
            commands::profile::handle_profile_command(command, conn_mgr, cli.output)
        }
        Commands::Deployment(command) => {
            let api = conn_mgr.create_client(cli.profile.as_deref())?;
            commands::deployment::handle_deployment_command(command, &api, cli.output).await
        }
    }
}
