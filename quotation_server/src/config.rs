//! Server configuration loaded from the environment.
use std::env;

use log::info;
use quotation_common::net::{DATABASE_URL_ENV, DEFAULT_PORT, PORT_ENV};
use quotation_common::{QuotationError, Result};

/// Runtime configuration of the quotation server.
pub struct Config {
    /// TCP port to bind.
    pub port: u16,
    /// Connection string of the backing document store.
    pub database_url: String,
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// `DATABASE_URL` is required; a missing value is fatal at startup.
    /// `PORT` is optional and falls back to the default port.
    pub fn load() -> Result<Self> {
        let database_url = env::var(DATABASE_URL_ENV).map_err(|_| {
            QuotationError::Config(format!(
                "{} is not defined in the environment",
                DATABASE_URL_ENV
            ))
        })?;

        let port = match env::var(PORT_ENV) {
            Ok(raw) => raw.parse().map_err(|e| {
                QuotationError::Config(format!("invalid {} value `{}`: {}", PORT_ENV, raw, e))
            })?,
            Err(_) => {
                info!("{} not set, using default: {}", PORT_ENV, DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        Ok(Config { port, database_url })
    }
}
