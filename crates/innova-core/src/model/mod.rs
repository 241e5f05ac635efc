// ── Domain model ──

pub mod fan_speed;
pub mod function;
pub mod identity;
pub mod mode;
pub mod snapshot;
pub mod temperature;

pub use fan_speed::{FanSpeed, FanSpeedTable};
pub use function::Function;
pub use identity::DeviceIdentity;
pub use mode::{Mode, ModeKind, ModeRegistry};
pub use snapshot::{StatusSnapshot, keys};
pub use temperature::{MAX_TEMPERATURE, MIN_TEMPERATURE, TemperatureScale};
