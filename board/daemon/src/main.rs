//! Stockboard Daemon - Telemetry Ingest and Render Loop
//!
//! This is the main entry point for the stockboard daemon. It listens for
//! line-delimited JSON match telemetry on a TCP socket and drives the render
//! state machine against a display.
//!
//! # Usage
//!
//! ```bash
//! # Start with defaults (terminal preview, 127.0.0.1:8081)
//! stockboard-daemon
//!
//! # Custom listen address
//! stockboard-daemon --listen-addr 0.0.0.0:9100
//!
//! # With config file
//! stockboard-daemon --config /etc/stockboard/stockboard.toml
//!
//! # Verbose logging
//! RUST_LOG=debug stockboard-daemon
//! ```
//!
//! # Signals
//!
//! - `SIGTERM` / `SIGINT`: Graceful shutdown

mod preview;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};

use stockboard_core::config::load_config;
use stockboard_core::{
    DisplayTarget, Ingest, MatchStore, MemoryDisplay, NoIcons, RenderMachine, Resolver,
};

use preview::TerminalPreview;

/// Stockboard Daemon - Live match telemetry on a 64x64 panel
#[derive(Parser, Debug)]
#[command(name = "stockboard-daemon")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TCP address to listen on for telemetry lines
    #[arg(short = 'a', long, env = "STOCKBOARD_LISTEN_ADDR", value_name = "ADDR")]
    listen_addr: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "STOCKBOARD_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "STOCKBOARD_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Run without the terminal preview (frames go to an in-memory sink)
    #[arg(long)]
    headless: bool,
}

/// Initialize logging with the specified level
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "stockboard_daemon={level},stockboard_core={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Drive the render machine until it hits a fatal display fault
///
/// Non-fatal tick errors are logged and skipped; the board keeps running.
async fn render_loop<D: DisplayTarget>(mut machine: RenderMachine<D>) {
    loop {
        match machine.tick(Instant::now()) {
            Ok(delay) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Err(e) if e.is_fatal() => {
                error!(error = %e, "Display gone, stopping render loop");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Render tick skipped");
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
        }
    }
}

async fn run<D: DisplayTarget + 'static>(
    listener: TcpListener,
    ingest: Ingest,
    machine: RenderMachine<D>,
) -> Result<()> {
    let ingest_task = tokio::spawn(stockboard_core::ingest::serve(listener, ingest));
    let render_task = tokio::spawn(render_loop(machine));

    let mut sigterm = signal(SignalKind::terminate()).context("SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("SIGINT handler")?;

    tokio::select! {
        _ = sigterm.recv() => {
            info!("SIGTERM received, shutting down");
        }
        _ = sigint.recv() => {
            info!("SIGINT received, shutting down");
        }
        result = ingest_task => {
            match result {
                Ok(Err(e)) => error!(error = %e, "Ingest server failed"),
                Err(e) => error!(error = %e, "Ingest task panicked"),
                Ok(Ok(())) => info!("Ingest server stopped"),
            }
        }
        _ = render_task => {
            error!("Render loop stopped");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("Stockboard daemon starting");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = load_config(args.config.as_deref()).context("Loading configuration")?;

    let listen_addr = args
        .listen_addr
        .unwrap_or_else(|| config.ingest.listen_addr.clone());
    info!(listen_addr = %listen_addr, grid_view = config.display.grid_view_4p, "Configured");

    let store = MatchStore::new(config.display.grid_view_4p);
    let ingest = Ingest::new(store.clone(), Resolver::new(config.colors.clone()));

    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("Binding telemetry listener on {listen_addr}"))?;

    if args.headless {
        let machine = RenderMachine::new(
            store,
            MemoryDisplay::new(),
            Box::new(NoIcons),
            config.colors,
            config.timing,
        );
        run(listener, ingest, machine).await
    } else {
        let display = TerminalPreview::new().context("Claiming the terminal")?;
        let machine = RenderMachine::new(
            store,
            display,
            Box::new(NoIcons),
            config.colors,
            config.timing,
        );
        run(listener, ingest, machine).await
    }
}
