//! Flight query service.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /?airtime_min=340&date=true
//!          │
//!          ▼
//!   ┌─────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!   │    http     │───▶│   dataset    │───▶│    query     │───▶│   response   │
//!   │  handler    │    │ load (fresh) │    │ airtime_min  │    │ project, cap │
//!   └─────────────┘    └──────────────┘    └──────────────┘    │ render XML   │
//!          ▲                                                   └──────┬───────┘
//!          └──────────── XML + X-Total-Records / X-Returned-Records ──┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use flight_query::config::ServiceConfig;
use flight_query::http::HttpServer;
use flight_query::lifecycle::{self, startup::Overrides, Shutdown, StartupError};
use flight_query::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "flight-query")]
#[command(about = "Serve a JSON lines flight dataset as filtered XML", long_about = None)]
struct Cli {
    /// Path to the newline-delimited JSON dataset
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Address to bind
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match lifecycle::prepare(
        cli.config.as_deref(),
        Overrides {
            input: cli.input,
            host: cli.host,
            port: cli.port,
        },
    ) {
        Ok(config) => config,
        Err(StartupError::MissingInput(path)) => {
            eprintln!("Cannot find input file: {}", path.display());
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging(&config.observability)?;

    tracing::info!("flight-query v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        log_format = ?config.observability.log_format,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("Listening on http://{}", local_addr);
    tracing::info!("Query parameters:");
    tracing::info!("  ?date=true        include the flight date");
    tracing::info!("  ?airtime_min=X    keep flights with air time above X minutes");
    tracing::info!("  example: http://{}/?date=true&airtime_min=340", local_addr);

    let shutdown = Shutdown::new();
    tokio::spawn(lifecycle::signals::forward_signals(shutdown.clone()));

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    Ok(())
}
