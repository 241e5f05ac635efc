use thiserror::Error;

/// Top-level error type for the `innova-api` crate.
///
/// Covers transport failures (connection refused, timeouts) and protocol
/// failures (non-200 responses, `success: false` envelopes, missing
/// `RESULT`). `innova-core` collapses all of them into a boolean outcome.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header value (serial, UID) contained characters HTTP cannot carry.
    #[error("Invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    // ── Protocol ────────────────────────────────────────────────────
    /// The unit answered with a non-200 status code.
    #[error("Unexpected HTTP status {status}")]
    Status { status: u16 },

    /// The unit answered 200 but the envelope did not report success.
    #[error("Request rejected by unit: {message}")]
    Rejected { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed. `body` has the password masked.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
