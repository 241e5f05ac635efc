// innova-core: Device layer between innova-api and consumers (CLI, integrations).
//
// A status fetch resolves the unit's firmware family once; from then on
// reads come from the last snapshot and writes patch it optimistically.

pub mod config;
pub mod device;
pub mod error;
pub mod innova;
pub mod model;
pub mod transport;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ConnectionConfig;
pub use device::{AirLeaf, Capabilities, Device, DeviceFamily, TwoPointZero};
pub use error::CoreError;
pub use innova::Innova;
pub use transport::Transport;

pub use model::{
    DeviceIdentity, FanSpeed, FanSpeedTable, Function, MAX_TEMPERATURE, MIN_TEMPERATURE, Mode,
    ModeKind, ModeRegistry, StatusSnapshot, TemperatureScale,
};

// Transport types callers need to build or fake a connection.
pub use innova_api::{Connection, InnovaClient, Payload, StatusDocument};
