//! Echo service entry point.

use std::net::IpAddr;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use echo_service::api::{serve, AppState, ServiceIdentity};
use echo_service::config::Config;
use echo_service::error::AppError;
use echo_service::metrics;
use echo_service::probe::{parse_target, ProbeClient};
use echo_service::utils::shutdown_signal;

/// Stateless JSON echo service.
#[derive(Parser, Debug)]
#[command(name = "echo-service")]
#[command(about = "Serve the root/health/ping/echo JSON endpoints, or probe running services")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format.
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,

    /// Address to bind (overrides HOST). Used by `serve`.
    #[arg(long, global = true)]
    host: Option<IpAddr>,

    /// HTTP server port (overrides PORT). Used by `serve`.
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service (default).
    Serve,

    /// Check one or more running services and report pass/fail per endpoint.
    Probe {
        /// Base URL of a service to check. Repeat for several services.
        #[arg(short, long = "target", default_value = "http://localhost:8080")]
        targets: Vec<String>,

        /// Per-check timeout in seconds.
        #[arg(long, default_value = "5")]
        timeout_secs: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("echo_service=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match args.log_format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }

    match args.command {
        Some(Command::Probe {
            targets,
            timeout_secs,
        }) => cmd_probe(targets, timeout_secs).await,
        Some(Command::Serve) | None => cmd_serve(args.host, args.port).await,
    }
}

/// Run the HTTP service until SIGINT/SIGTERM.
async fn cmd_serve(host_override: Option<IpAddr>, port_override: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        AppError::from(e)
    })?;

    // Override with CLI args if provided
    if let Some(host) = host_override {
        config.host = host;
    }
    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(AppError::InvalidConfig(e).into());
    }

    info!("Environment: {}", config.environment);
    info!("Service name: {}", config.service_name);
    info!(
        cors = config.cors_enabled,
        docs = config.docs_enabled,
        metrics = config.metrics_enabled,
        "Optional surfaces"
    );

    let mut state = AppState::new(ServiceIdentity::from_config(&config));
    if config.metrics_enabled {
        match metrics::install_recorder() {
            Ok(handle) => state = state.with_metrics(handle),
            Err(e) => warn!("Metrics disabled, failed to install recorder: {}", e),
        }
    }

    serve(&config, state, shutdown_signal()).await?;
    Ok(())
}

/// Probe running services and print one line per check.
async fn cmd_probe(targets: Vec<String>, timeout_secs: u64) -> anyhow::Result<()> {
    let targets = targets
        .iter()
        .map(|raw| parse_target(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let client = ProbeClient::new(Duration::from_secs(timeout_secs))?;

    println!("======================================================================");
    println!("PROBING {} SERVICE(S)", targets.len());
    println!("======================================================================");

    let report = client.probe_all(&targets).await;
    for outcome in &report.outcomes {
        println!("{}", outcome);
    }

    println!("----------------------------------------------------------------------");
    println!("{}", report.summary());

    if report.all_passed() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} probe check(s) failed",
            report.failures().count()
        ))
    }
}
