//! Transport NSW next-departure sensor
//!
//! Command-line host for the sensor: poll continuously, update once, or
//! inspect the icon table and configuration.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use domain::{UNKNOWN_ICON, VehicleMode};
use infrastructure::{AppConfig, SensorPoller, build_adapter, build_sensor, init_logging};
use tracing::{info, warn};

/// Transport NSW next-departure sensor
#[derive(Parser)]
#[command(name = "tnsw-sensor")]
#[command(author, version, about = "Next departure sensor for Transport NSW stops", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, env = "TNSW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the stop and print every update as a JSON line
    ///
    /// Stops on Ctrl-C.
    Run,

    /// Update once and print the sensor as pretty JSON
    Once,

    /// Print the vehicle mode to icon table
    Icons,

    /// Load and validate the configuration, then print it
    ///
    /// The API key is never printed.
    CheckConfig,
}

/// Log filter override from verbosity count, `None` keeps the configured one
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Load configuration and install logging
fn prepare(path: Option<&Path>, verbose: u8) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load_from(path).context("Failed to load configuration")?;

    if let Some(filter) = log_filter_from_verbosity(verbose) {
        config.logging.filter = filter.to_string();
    }
    init_logging(&config.logging)?;

    Ok(config)
}

fn print_icons() {
    for mode in VehicleMode::ALL {
        println!("{:<10} {}", mode.label(), mode.icon());
    }
    println!("{:<10} {UNKNOWN_ICON}", "n/a");
}

fn check_config(config: &AppConfig) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        bail!("Invalid configuration: {e}");
    }

    println!("{}", toml::to_string_pretty(config)?);
    println!("# api_key = [REDACTED]");
    println!("# ✅ Configuration is valid");
    Ok(())
}

async fn once(config: &AppConfig) -> anyhow::Result<()> {
    let mut sensor = build_sensor(config, build_adapter(config)?)?;
    sensor.update().await.context("Sensor update failed")?;

    println!("{}", serde_json::to_string_pretty(&sensor.snapshot())?);
    Ok(())
}

async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let sensor = build_sensor(config, build_adapter(config)?)?;
    let poller = SensorPoller::new(sensor, config.poller.interval());

    let mut snapshots = poller.subscribe();
    let printer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let line = serde_json::to_string(&*snapshots.borrow_and_update());
            match line {
                Ok(line) => println!("{line}"),
                Err(e) => warn!(error = %e, "Failed to serialize snapshot"),
            }
        }
    });

    poller
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl-C");
            }
            info!("Shutting down");
        })
        .await;

    drop(poller);
    printer.await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let path = cli.config.as_deref();

    match cli.command {
        Commands::Icons => {
            print_icons();
            Ok(())
        },
        Commands::CheckConfig => check_config(&prepare(path, cli.verbose)?),
        Commands::Once => once(&prepare(path, cli.verbose)?).await,
        Commands::Run => run(&prepare(path, cli.verbose)?).await,
    }
}
