//! Command-line arguments for the Quotation Client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::Parser;
use quotation_common::net::{DEFAULT_API_URL, DEFAULT_SOCKET_URL};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the quotation API.
    #[clap(long, env = "QUOTATION_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// WebSocket URL pushing live change events.
    #[clap(long, env = "QUOTATION_SOCKET_URL", default_value = DEFAULT_SOCKET_URL)]
    pub socket_url: String,

    /// Path of the local snapshot file.
    /// Defaults to a file under the platform data directory.
    #[clap(long, env = "QUOTATION_CACHE_PATH")]
    pub cache_path: Option<PathBuf>,

    /// Automatic refresh interval in seconds. 0 disables automatic refresh.
    #[clap(long, default_value_t = 0)]
    pub refresh_secs: u64,

    /// Do not listen for live change events.
    #[clap(long)]
    pub no_live: bool,

    /// Fetch and render once, then exit.
    #[clap(long)]
    pub once: bool,
}
