//! Fetching the quotation list from the backend.
//!
//! A single fixed endpoint, no query parameters, no pagination, no
//! authentication. Failures are typed so the sync policy can report them:
//! `Network` for transport problems, `Http` for non-2xx answers, `Decode`
//! for a body that is not a quotation list.
use log::debug;

use quotation_common::net::QUOTATIONS_PATH;
use quotation_common::{QuotationError, QuotationRecord, Result};

/// Read-only access to the remote quotation collection.
pub trait FetchQuotations {
    /// Retrieves the full quotation list from the backend.
    fn fetch(&self) -> Result<Vec<QuotationRecord>>;
}

/// HTTP fetcher hitting the fixed collection endpoint.
pub struct HttpFetcher {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Creates a fetcher for the given API base URL.
    pub fn new(base_url: String) -> Self {
        HttpFetcher {
            base_url,
            http: reqwest::blocking::Client::new(),
        }
    }
}

impl FetchQuotations for HttpFetcher {
    fn fetch(&self) -> Result<Vec<QuotationRecord>> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), QUOTATIONS_PATH);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| QuotationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuotationError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| QuotationError::Network(e.to_string()))?;
        let records = serde_json::from_str(&body)?;
        Ok(records)
    }
}
