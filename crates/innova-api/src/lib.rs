// innova-api: Async HTTP client for Innova heat pump controller units

pub mod client;
pub mod error;
pub mod status;
pub mod transport;

pub use client::{InnovaClient, Payload, STATUS_PATH};
pub use error::Error;
pub use status::{Network, Setup, Software, StatusDocument, redact_body};
pub use transport::{Connection, RetryPolicy, TransportConfig};
