//! Shared networking constants and helpers used by client and server.

/// TCP port the quotation server binds by default.
pub const DEFAULT_PORT: u16 = 8888;

/// HTTP path serving the quotation collection.
///
/// An earlier variant of the service answered on `/api/quotations`; that
/// path is legacy and is not served here.
pub const QUOTATIONS_PATH: &str = "/bar-service-quotations";

/// HTTP path upgraded to a WebSocket for live change events.
pub const WS_PATH: &str = "/ws";

/// Base URL the client talks to unless overridden.
pub const DEFAULT_API_URL: &str = "http://localhost:8888";

/// WebSocket URL the client listens on unless overridden.
pub const DEFAULT_SOCKET_URL: &str = "ws://localhost:8888/ws";

/// Environment variable holding the backend database connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable overriding the server port.
pub const PORT_ENV: &str = "PORT";

/// Helper to format a host with a port like "host:port".
pub fn addr(host: &str, port: u16) -> String {
    format!("{}:{}", host, port)
}
