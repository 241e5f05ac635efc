// ── AirLeaf functions ──
//
// AirLeaf units have no direct fan-speed command. Fan behaviour is picked
// through named presets, one of which (NIGHT) is not a fan level at all.

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use super::fan_speed::FanSpeed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Function {
    Auto,
    Night,
    Min,
    Max,
}

impl Function {
    pub fn command(self) -> &'static str {
        match self {
            Self::Auto => "set/function/auto",
            Self::Night => "set/function/night",
            Self::Min => "set/function/min",
            Self::Max => "set/function/max",
        }
    }

    /// Value reported in `fn`.
    pub fn code(self) -> i64 {
        match self {
            Self::Auto => 1,
            Self::Night => 2,
            Self::Min => 3,
            Self::Max => 4,
        }
    }

    /// The fan level this preset stands for. NIGHT is a preset only.
    pub fn fan_speed(self) -> Option<FanSpeed> {
        match self {
            Self::Auto => Some(FanSpeed::Auto),
            Self::Night => None,
            Self::Min => Some(FanSpeed::Low),
            Self::Max => Some(FanSpeed::High),
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::iter().find(|f| f.code() == code)
    }

    /// First function whose fan level is `speed`.
    pub fn for_speed(speed: FanSpeed) -> Option<Self> {
        Self::iter().find(|f| f.fan_speed() == Some(speed))
    }

    /// Fan levels reachable through some function, in table order.
    pub fn fan_speeds() -> Vec<FanSpeed> {
        Self::iter().filter_map(Self::fan_speed).collect()
    }
}
