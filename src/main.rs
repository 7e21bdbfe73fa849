//! codementor - Interactive AI code mentor CLI
//!
//! Main entry point: parses the CLI, loads and validates configuration,
//! and dispatches to the subcommand handlers.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use codementor::cli::Cli;
use codementor::commands;
use codementor::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path, &cli)?;
    config.validate()?;
    tracing::debug!("Using backend at {}", config.backend.base_url);

    commands::handle_command(cli, config).await
}

/// Initialize tracing subscriber with environment filter
///
/// `--verbose` bumps the crate's default level to debug; the
/// `RUST_LOG` environment variable still wins when set.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "codementor=debug"
    } else {
        "codementor=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
