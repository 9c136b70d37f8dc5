//! Quotation HTTP/WebSocket server.
//!
//! This binary serves the bar-service quotation collection over HTTP and
//! pushes change events to connected WebSocket listeners. It wires together
//! three main building blocks:
//!
//! - `QuotationStore` — SQLite-backed document store holding one JSON
//!   document per quotation, owning the change feed every mutation reports
//!   into.
//! - HTTP routes — list/create/update/delete handlers plus a liveness
//!   probe, with permissive CORS for browser consumers.
//! - WebSocket fan-out — every open connection subscribes to the change
//!   feed and receives each event as one JSON text frame, best effort.
//!
//! Startup and shutdown:
//! - `DATABASE_URL` must name the backing store; a missing value is fatal
//!   and the process exits non-zero before binding the listener.
//! - `PORT` optionally overrides the listening port.
//! - SIGINT/SIGTERM trigger a graceful shutdown of the accept loop.
//!
//! Note: This file only orchestrates; the store, route table, handlers,
//! and fan-out live in their own modules.
#![warn(missing_docs)]
use log::info;
use quotation_common::net;
use quotation_common::QuotationError;
use quotation_common::Result;

use crate::config::Config;
use crate::store::QuotationStore;

mod config;
mod error;
mod handlers;
mod routes;
mod store;
mod ws;

#[tokio::main]
async fn main() -> Result<(), QuotationError> {
    init_logger();
    let config = Config::load()?;
    let store = QuotationStore::connect(&config.database_url).await?;
    info!("Connected to document store at {}", config.database_url);

    let app = routes::build_router(store);
    let bind_addr = net::addr("0.0.0.0", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Quotation server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
