//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use innova_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("No unit configured")]
    #[diagnostic(
        code(innova::no_connection),
        help(
            "Pass --host for a unit on the local network, or --serial and --uid\n\
             for cloud access. Both can also be set in {path}\n\
             or through INNOVA_HOST / INNOVA_SERIAL / INNOVA_UID."
        )
    )]
    NoConnection { path: String },

    #[error("Could not read status from {target}")]
    #[diagnostic(
        code(innova::unreachable),
        help(
            "Check that the unit is powered and reachable, and that it is an\n\
             Innova 2.0 or AirLeaf model. Re-run with -vv for details."
        )
    )]
    Unreachable { target: String },

    // ── Operations ───────────────────────────────────────────────────

    #[error("The unit did not accept '{operation}'")]
    #[diagnostic(code(innova::rejected), help("Re-run with -vv to see the unit's response."))]
    Rejected { operation: String },

    #[error("'{operation}' is not supported by {model} units")]
    #[diagnostic(code(innova::unsupported))]
    Unsupported { operation: String, model: String },

    #[error("Unsupported device type {code:?}")]
    #[diagnostic(
        code(innova::unsupported_device),
        help("Only Innova 2.0 (\"001\") and AirLeaf (\"002\") units can be driven.")
    )]
    UnsupportedDevice { code: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(innova::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(innova::config))]
    Config(Box<figment::Error>),

    #[error("API error: {message}")]
    #[diagnostic(code(innova::api_error))]
    Api { message: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON: {0}")]
    #[diagnostic(code(innova::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoConnection { .. } | Self::Unreachable { .. } => exit_code::CONNECTION,
            Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            Self::Unsupported { .. } | Self::UnsupportedDevice { .. } => exit_code::UNSUPPORTED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnsupportedDevice { code } => CliError::UnsupportedDevice { code },
            CoreError::Config { message } => CliError::Validation {
                field: "connection".into(),
                reason: message,
            },
            CoreError::Api { message, status: _ } => CliError::Api { message },
            e @ CoreError::StatusUnavailable => CliError::Api {
                message: e.to_string(),
            },
        }
    }
}
