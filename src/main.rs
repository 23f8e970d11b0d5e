//! raidmon - RAID Controller Health Monitor
//!
//! Checks MegaRAID and 3ware controllers through their vendor tools and
//! reports per-unit/per-drive health. Intended to run from cron; exits
//! non-zero when any controller is unhealthy or could not be checked.

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use raidmon::{
    CliRunner, ControllerSpec, Error, LogSink, RaidMonitor, Result, RunnerConfig,
    DEFAULT_CONCURRENCY,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// RAID controller health monitor for MegaRAID and 3ware adapters
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Controller to check as <kind>:<index>, e.g. megaraid:0 or 3ware:4
    /// (repeatable)
    #[arg(long = "controller", required = true, value_name = "KIND:INDEX")]
    controllers: Vec<String>,

    /// Path to the storcli binary
    #[arg(long, env = "STORCLI_PATH", default_value = "storcli64")]
    storcli_path: String,

    /// Path to the tw_cli binary
    #[arg(long, env = "TW_CLI_PATH", default_value = "tw_cli")]
    tw_cli_path: String,

    /// Maximum controllers checked in parallel
    #[arg(long, env = "RAIDMON_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Print the aggregate report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args);

    info!("Starting RAID check");
    info!("  Version: {}", raidmon::VERSION);
    info!("  Controllers: {}", args.controllers.join(", "));

    // Fail fast on configuration errors, before any tool is invoked
    let specs = parse_controllers(&args.controllers).map_err(|e| {
        error!("{}", e);
        e
    })?;

    let runner = Arc::new(CliRunner::new(RunnerConfig {
        storcli_path: args.storcli_path.clone(),
        tw_cli_path: args.tw_cli_path.clone(),
    }));
    let sink = Arc::new(LogSink::new());
    let monitor = RaidMonitor::with_concurrency(runner, sink, args.concurrency);

    let aggregate = monitor.check_all(&specs).await;

    if args.json {
        let encoded = serde_json::to_string_pretty(&aggregate)
            .map_err(|e| Error::Internal(format!("Failed to encode report: {}", e)))?;
        println!("{}", encoded);
    }

    if aggregate.any_unhealthy {
        std::process::exit(1);
    }

    Ok(())
}

/// Parse and validate all controller arguments up front
fn parse_controllers(raw: &[String]) -> Result<Vec<ControllerSpec>> {
    raw.iter().map(|s| s.parse::<ControllerSpec>()).collect()
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
