// ── Fan speed scale ──
//
// A single ordinal scale shared by every family. Each family supports a
// subset of it and maps that subset to its own wire codes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum FanSpeed {
    #[default]
    Auto = 0,
    Low = 1,
    MediumLow = 2,
    Medium = 3,
    MediumHigh = 4,
    High = 5,
}

impl FanSpeed {
    /// Position on the AUTO..HIGH scale.
    #[allow(clippy::as_conversions)]
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Bidirectional speed ↔ wire-code table for one family.
#[derive(Debug, Clone, Copy)]
pub struct FanSpeedTable {
    entries: &'static [(FanSpeed, i64)],
}

impl FanSpeedTable {
    pub const fn new(entries: &'static [(FanSpeed, i64)]) -> Self {
        Self { entries }
    }

    pub fn encode(&self, speed: FanSpeed) -> Option<i64> {
        self.entries
            .iter()
            .find(|(s, _)| *s == speed)
            .map(|(_, code)| *code)
    }

    /// Unmapped codes read as [`FanSpeed::Auto`].
    pub fn decode(&self, code: i64) -> FanSpeed {
        self.entries
            .iter()
            .find(|(_, c)| *c == code)
            .map_or(FanSpeed::Auto, |(speed, _)| *speed)
    }

    pub fn speeds(&self) -> Vec<FanSpeed> {
        self.entries.iter().map(|(speed, _)| *speed).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    const TABLE: FanSpeedTable =
        FanSpeedTable::new(&[(FanSpeed::Auto, 0), (FanSpeed::Low, 1), (FanSpeed::High, 3)]);

    #[test]
    fn round_trip() {
        for speed in TABLE.speeds() {
            assert_eq!(TABLE.decode(TABLE.encode(speed).unwrap()), speed);
        }
    }

    #[test]
    fn unmapped_values() {
        assert_eq!(TABLE.encode(FanSpeed::Medium), None);
        assert_eq!(TABLE.decode(17), FanSpeed::Auto);
    }

    #[test]
    fn ordinals_follow_scale() {
        assert_eq!(FanSpeed::Auto.ordinal(), 0);
        assert_eq!(FanSpeed::High.ordinal(), 5);
        assert!(FanSpeed::MediumLow < FanSpeed::MediumHigh);
    }

    #[test]
    fn names() {
        assert_eq!(FanSpeed::MediumHigh.to_string(), "MEDIUM_HIGH");
        assert_eq!(FanSpeed::from_str("medium_low").unwrap(), FanSpeed::MediumLow);
    }
}
