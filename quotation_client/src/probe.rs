//! Connectivity probe deciding between live fetch and offline fallback.
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::debug;

use quotation_common::net;
use quotation_common::{QuotationError, Result};

/// How long the probe waits for a TCP connect before declaring offline.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Reports whether the backend looks reachable.
pub trait Connectivity {
    /// `true` when a fetch is worth attempting.
    fn is_online(&self) -> bool;
}

/// Probe that dials the API host over TCP.
#[derive(Debug)]
pub struct TcpProbe {
    addr: String,
}

impl TcpProbe {
    /// Derives the probe target from the API base URL.
    pub fn from_api_url(api_url: &str) -> Result<Self> {
        let url = reqwest::Url::parse(api_url).map_err(|e| {
            QuotationError::Config(format!("invalid API URL `{}`: {}", api_url, e))
        })?;
        let host = url
            .host_str()
            .ok_or_else(|| QuotationError::Config(format!("API URL `{}` has no host", api_url)))?;
        let port = url.port_or_known_default().unwrap_or(80);
        Ok(TcpProbe {
            addr: net::addr(host, port),
        })
    }
}

impl Connectivity for TcpProbe {
    fn is_online(&self) -> bool {
        let Ok(mut addrs) = self.addr.to_socket_addrs() else {
            return false;
        };
        let Some(addr) = addrs.next() else {
            return false;
        };
        match TcpStream::connect_timeout(&addr, PROBE_TIMEOUT) {
            Ok(_) => true,
            Err(e) => {
                debug!("Connectivity probe to {} failed: {}", self.addr, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn derives_host_and_port_from_the_api_url() {
        let probe = TcpProbe::from_api_url("http://192.168.0.10:8888").unwrap();
        assert_eq!(probe.addr, "192.168.0.10:8888");
    }

    #[test]
    fn defaults_to_the_scheme_port() {
        let probe = TcpProbe::from_api_url("http://example.com").unwrap();
        assert_eq!(probe.addr, "example.com:80");
    }

    #[test]
    fn rejects_an_unparseable_url() {
        let err = TcpProbe::from_api_url("not a url").unwrap_err();
        assert!(matches!(err, QuotationError::Config(_)));
    }

    #[test]
    fn detects_a_listening_endpoint() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let probe = TcpProbe::from_api_url(&format!("http://127.0.0.1:{}", port)).unwrap();
        assert!(probe.is_online());
    }

    #[test]
    fn reports_offline_when_nothing_listens() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let probe = TcpProbe::from_api_url(&format!("http://127.0.0.1:{}", port)).unwrap();
        assert!(!probe.is_online());
    }
}
