// ── Core error types ──
//
// Write operations and reads never surface these: they collapse to a
// boolean or a default. Errors only escape from construction paths
// (configuration, client building) and from device resolution.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The unit reported a device-type code no variant handles.
    #[error("Unsupported device type code: {code:?}")]
    UnsupportedDevice { code: String },

    /// No usable status document: unreachable unit, rejected request or
    /// a document without `RESULT`. Details are logged by the transport.
    #[error("No usable status from the unit")]
    StatusUnavailable,

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport-layer failure, flattened to a message.
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<innova_api::Error> for CoreError {
    fn from(err: innova_api::Error) -> Self {
        match err {
            innova_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            innova_api::Error::InvalidHeader { name } => CoreError::Config {
                message: format!("Invalid value for header {name}"),
            },
            innova_api::Error::Status { status } => CoreError::Api {
                message: format!("Unexpected HTTP status {status}"),
                status: Some(status),
            },
            innova_api::Error::Transport(ref e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            other => CoreError::Api {
                message: other.to_string(),
                status: None,
            },
        }
    }
}
