// ── Runtime connection configuration ──
//
// Describes *how* to reach a unit. Never touches disk: the CLI (or any
// other host) builds a `ConnectionConfig` and hands it in.

use std::time::Duration;

use innova_api::{Connection, RetryPolicy, TransportConfig};

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub connection: Connection,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Total attempts per request, including the first.
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl ConnectionConfig {
    pub fn local(host: impl Into<String>) -> Self {
        Self::with_connection(Connection::Local { host: host.into() })
    }

    pub fn cloud(serial: impl Into<String>, uid: impl Into<String>) -> Self {
        Self::with_connection(Connection::Cloud {
            serial: serial.into(),
            uid: uid.into(),
        })
    }

    /// Pick the connection mode from optional parts: a host means local
    /// mode, otherwise both serial and uid are required for cloud mode.
    pub fn from_parts(
        host: Option<&str>,
        serial: Option<&str>,
        uid: Option<&str>,
    ) -> Result<Self, CoreError> {
        match (host, serial, uid) {
            (Some(host), _, _) if !host.trim().is_empty() => Ok(Self::local(host.trim())),
            (_, Some(serial), Some(uid)) if !serial.is_empty() && !uid.is_empty() => {
                Ok(Self::cloud(serial, uid))
            }
            _ => Err(CoreError::Config {
                message: "either a host (local mode) or both serial and uid (cloud mode) are required"
                    .into(),
            }),
        }
    }

    fn with_connection(connection: Connection) -> Self {
        let transport = TransportConfig::default();
        Self {
            connection,
            timeout: transport.timeout,
            retry_attempts: transport.retry.attempts,
            retry_delay: transport.retry.delay,
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            retry: RetryPolicy {
                attempts: self.retry_attempts,
                delay: self.retry_delay,
            },
        }
    }
}
