// Shared transport configuration for building reqwest::Client instances.
//
// The connection mode decides the base URL and the identification headers;
// timeout and retry settings are the same for both modes.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use url::Url;

use crate::error::Error;

/// Base URL of the vendor cloud relay.
pub const CLOUD_API_URL: &str = "http://innovaenergie.cloud/api/v/1";

/// Default per-request timeout.
pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(20);

/// How to reach a unit. Chosen once, at client construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    /// Direct HTTP to the unit on the local network (`host` may carry a port).
    Local { host: String },
    /// Through the cloud relay, identified by the unit's serial and MAC.
    Cloud { serial: String, uid: String },
}

impl Connection {
    /// The API root for this connection mode.
    pub fn base_url(&self) -> Result<Url, Error> {
        let raw = match self {
            Self::Local { host } => format!("http://{host}/api/v/1"),
            Self::Cloud { .. } => CLOUD_API_URL.to_owned(),
        };
        Ok(Url::parse(&raw)?)
    }

    /// Default headers sent on every request. Empty in local mode.
    pub fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        if let Self::Cloud { serial, uid } = self {
            headers.insert(
                "X-serial",
                HeaderValue::from_str(serial)
                    .map_err(|_| Error::InvalidHeader { name: "X-serial" })?,
            );
            headers.insert(
                "X-UID",
                HeaderValue::from_str(uid).map_err(|_| Error::InvalidHeader { name: "X-UID" })?,
            );
        }
        Ok(headers)
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }
}

/// Bounded retry: `attempts` tries in total with a fixed pause between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 2,
            delay: Duration::from_secs(2),
        }
    }
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: CONNECTION_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` carrying the connection's default headers.
    pub fn build_client(&self, connection: &Connection) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("innova-controls/", env!("CARGO_PKG_VERSION")))
            .default_headers(connection.headers()?)
            .build()
            .map_err(Error::Transport)
    }
}
