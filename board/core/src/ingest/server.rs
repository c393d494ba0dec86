//! Telemetry Listener
//!
//! A TCP listener for the line-delimited JSON telemetry feed. One connection
//! is serviced at a time, one message at a time - that matches the producer,
//! which maintains a single long-lived connection. If the connection drops,
//! the listener simply accepts the next one; the render side keeps running on
//! whatever state it last saw either way.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use super::{Ingest, IngestError};

/// Accept telemetry connections forever
///
/// # Errors
///
/// Returns only when the listener socket itself fails; per-connection and
/// per-message errors are logged and absorbed.
pub async fn serve(listener: TcpListener, ingest: Ingest) -> Result<(), IngestError> {
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, "Telemetry listener awaiting input");

    loop {
        let (stream, peer) = listener.accept().await?;
        tracing::info!(peer = %peer, "Telemetry producer connected");

        if let Err(e) = handle_connection(stream, &ingest).await {
            tracing::warn!(peer = %peer, error = %e, "Telemetry connection errored");
        } else {
            tracing::info!(peer = %peer, "Telemetry producer disconnected");
        }
    }
}

/// Service one connection until it closes
async fn handle_connection(stream: TcpStream, ingest: &Ingest) -> Result<(), IngestError> {
    let mut lines = BufReader::new(stream).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if let Err(e) = ingest.apply_json(&line) {
            // Taxonomy rule: malformed input is dropped, never fatal.
            tracing::warn!(error = %e, "Dropped malformed telemetry message");
        }
    }
    Ok(())
}
