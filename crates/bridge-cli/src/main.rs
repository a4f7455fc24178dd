//! bridge - command-line client for the Bridge REST API.
//!
//! A thin wrapper over the `bridge-rest` library, useful for checking
//! credentials and poking at a server by hand.

mod cli;
mod commands;
mod output;

use anyhow::{Context as _, Result};
use bridge_rest::{ClientCache, ClientConfig};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::Context;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);
    debug!(host = %cli.host, version = env!("BRIDGE_VERSION"), "starting");

    let config = ClientConfig::new(&cli.host)
        .context("Invalid Bridge host")?
        .user_agent(format!("bridge-cli/{}", env!("BRIDGE_VERSION")));
    let ctx = Context {
        cache: ClientCache::new(config).context("Failed to set up HTTP client")?,
        json: cli.json,
    };

    match cli.command {
        Commands::Studies(args) => commands::studies::run(args, &ctx).await,
        Commands::SignIn(args) => commands::sign_in::run(args, &ctx).await,
        Commands::Whoami(args) => commands::whoami::run(args, &ctx).await,
        Commands::Subpopulations(args) => commands::subpopulations::run(args, &ctx).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so --json output on stdout stays parseable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
