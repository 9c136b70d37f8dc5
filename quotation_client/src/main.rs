//! Quotation Client — a terminal viewer for bar-service quotations. It
//! loads the quotation list through the sync policy (live fetch with
//! offline fallback to the local snapshot), renders the records as text
//! cards, and keeps the view current by applying live change events
//! received over a WebSocket.
//!
//! Usage example (CLI):
//! ```bash
//! quotation_client --api-url http://192.168.0.10:8888 --refresh-secs 60
//! ```
//!
//! Pressing Enter refreshes the list (the terminal analog of
//! pull-to-refresh); Ctrl+C exits. Live updates touch only the list on
//! screen: the persisted snapshot changes on full fetches alone, so a
//! restart shows the last fetched state.
#![warn(missing_docs)]
mod apply;
mod args;
mod cache;
mod display;
mod fetcher;
mod listener;
mod probe;
mod sync;

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::{bounded, never, select, tick, unbounded, Receiver};
use log::info;
use quotation_common::QuotationError;
use quotation_common::Result;

use crate::apply::apply_event;
use crate::args::Args;
use crate::cache::SnapshotCache;
use crate::fetcher::HttpFetcher;
use crate::listener::LiveUpdateListener;
use crate::probe::TcpProbe;
use crate::sync::SyncPolicy;

fn main() -> Result<(), QuotationError> {
    init_logger();
    let args = Args::parse();

    let shutdown = Arc::new(AtomicBool::new(false));
    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down client...");
            shutdown.store(true, Ordering::SeqCst);
            let _ = shutdown_tx.try_send(());
        })
        .expect("Error setting Ctrl+C handler");
    }

    let cache_path = match args.cache_path.clone() {
        Some(path) => path,
        None => SnapshotCache::default_path().ok_or_else(|| {
            QuotationError::Config("no data directory available; pass --cache-path".to_string())
        })?,
    };
    info!("Snapshot cache at {}", cache_path.display());

    let policy = SyncPolicy::new(
        HttpFetcher::new(args.api_url.clone()),
        TcpProbe::from_api_url(&args.api_url)?,
        SnapshotCache::new(cache_path),
    );

    let outcome = policy.load();
    let mut records = outcome.records;
    let mut origin = outcome.origin;
    let mut diagnostic = outcome.diagnostic;
    display::render(&records, origin, diagnostic.as_deref());

    if args.once {
        return Ok(());
    }

    let mut live_rx = if args.no_live {
        never()
    } else {
        let (events_tx, events_rx) = unbounded();
        LiveUpdateListener::start(args.socket_url.clone(), events_tx, shutdown.clone());
        events_rx
    };

    let mut refresh_rx = spawn_refresh_on_stdin();
    let tick_rx = if args.refresh_secs > 0 {
        tick(Duration::from_secs(args.refresh_secs))
    } else {
        never()
    };

    info!("Client is running. Press Enter to refresh, Ctrl+C to exit.");
    loop {
        select! {
            recv(shutdown_rx) -> _ => break,
            recv(live_rx) -> event => match event {
                Ok(event) => {
                    apply_event(&mut records, event);
                    display::render(&records, origin, diagnostic.as_deref());
                }
                Err(_) => {
                    // Listener thread is gone; stop watching this channel.
                    live_rx = never();
                }
            },
            recv(refresh_rx) -> trigger => match trigger {
                Ok(()) => {
                    let outcome = policy.load();
                    records = outcome.records;
                    origin = outcome.origin;
                    diagnostic = outcome.diagnostic;
                    display::render(&records, origin, diagnostic.as_deref());
                }
                Err(_) => {
                    refresh_rx = never();
                }
            },
            recv(tick_rx) -> _ => {
                let outcome = policy.load();
                records = outcome.records;
                origin = outcome.origin;
                diagnostic = outcome.diagnostic;
                display::render(&records, origin, diagnostic.as_deref());
            },
        }
    }
    info!("Client stopped.");
    Ok(())
}

/// Spawns a thread that emits one refresh trigger per line read from
/// stdin.
fn spawn_refresh_on_stdin() -> Receiver<()> {
    let (trigger_tx, trigger_rx) = unbounded();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            if line.is_err() || trigger_tx.send(()).is_err() {
                break;
            }
        }
    });
    trigger_rx
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
