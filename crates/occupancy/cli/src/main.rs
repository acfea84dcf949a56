//! Occupancy CLI - live room occupancy report
//!
//! Queries the Density API once per configured room and prints the
//! current headcount, maximum capacity and percent full:
//! - rooms come from a config file roster, or `ROOM_IDS` paired with the
//!   built-in weight-room list
//! - a room that cannot be read is reported inline and never stops the run
//! - `--interval` repeats the report until interrupted

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use occupancy_client::DensityClient;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod output;
mod report;

use config::{CliConfig, Overrides, Settings};
use error::CliResult;
use output::OutputFormat;

/// Occupancy CLI application
#[derive(Parser)]
#[command(name = "occupancy")]
#[command(about = "Live room occupancy report from the Density API", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "OCCUPANCY_CONFIG")]
    config: Option<String>,

    /// Density API bearer token
    #[arg(long, env = "DENSITY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Comma-separated space identifiers, paired in order with the built-in rooms
    #[arg(long, env = "ROOM_IDS")]
    room_ids: Option<String>,

    /// Density API base URL
    #[arg(long, env = "DENSITY_API_BASE")]
    api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Output format (table, json, yaml)
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Repeat the report every N seconds until interrupted
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for the report
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    // Load config
    let config = CliConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(
        config,
        Overrides {
            token: cli.token,
            room_ids: cli.room_ids,
            api_base: cli.api_base,
            timeout_seconds: cli.timeout,
        },
    );

    if !settings.credential.is_present() {
        warn!("DENSITY_TOKEN is not set; no rooms will be queried");
    }

    // Create client
    let client = DensityClient::new(
        settings.credential.clone(),
        &settings.api_base,
        settings.timeout,
    )?;

    // Armed once so a Ctrl+C during a pass is not lost
    let stream = cli.interval.is_some();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut stdout = std::io::stdout().lock();
    loop {
        tokio::select! {
            result = report::run_pass(&settings.roster, &client, cli.output, stream, &mut stdout) => {
                result?;
            }
            _ = &mut shutdown => break,
        }

        let Some(interval) = cli.interval else {
            break;
        };
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(interval)) => {
                if cli.output == OutputFormat::Table {
                    writeln!(stdout)?;
                }
            }
            _ = &mut shutdown => break,
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received Ctrl+C, stopping");
        }
        _ = terminate => {
            info!("received terminate signal, stopping");
        }
    }
}
