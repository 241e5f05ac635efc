// ── Status snapshot ──
//
// Last-known wire status of a unit. Values stay in wire units; accessors
// on the device variants do the scaling. A snapshot is never mutated in
// place: fetches replace it, successful writes merge a delta into a copy.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Short wire keys used under `RESULT`.
pub mod keys {
    pub const POWER: &str = "ps";
    pub const MODE: &str = "wm";
    pub const SETPOINT: &str = "sp";
    /// Ambient temperature, whole degrees (TwoPointZero).
    pub const AMBIENT: &str = "t";
    /// Ambient temperature, tenths (AirLeaf).
    pub const AMBIENT_TENTHS: &str = "ta";
    pub const WATER: &str = "tw";
    pub const FAN_SPEED: &str = "fs";
    pub const FUNCTION: &str = "fn";
    pub const ROTATION: &str = "fr";
    pub const NIGHT_MODE: &str = "nm";
    pub const KEYBOARD_LOCK: &str = "kl";
    pub const CALENDAR: &str = "cm";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusSnapshot {
    fields: BTreeMap<String, Number>,
}

impl StatusSnapshot {
    /// Keep the numeric fields of a `RESULT` object exactly as sent.
    /// Booleans count as 0/1 and numeric strings are parsed; anything else
    /// is dropped.
    pub fn from_result(result: &Map<String, Value>) -> Self {
        let fields = result
            .iter()
            .filter_map(|(key, value)| numeric(value).map(|n| (key.clone(), n)))
            .collect();
        Self { fields }
    }

    /// Integral value of `key`. Fractional values are not codes, so they
    /// read as absent here; use [`value`](Self::value) for measurements.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(integral)
    }

    /// Raw value of `key`, fractional or not.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Number::as_f64)
    }

    /// `true` iff `key` is present and equals `value`.
    pub fn is(&self, key: &str, value: i64) -> bool {
        self.get(key) == Some(value)
    }

    /// Copy of this snapshot with `delta` written over it.
    pub fn merged(&self, delta: &[(&str, i64)]) -> Self {
        let mut fields = self.fields.clone();
        for (key, value) in delta {
            fields.insert((*key).to_owned(), Number::from(*value));
        }
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Number)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for StatusSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Number::from(v)))
                .collect(),
        }
    }
}

fn numeric(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::Bool(b) => Some(Number::from(i64::from(*b))),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .map(Number::from)
                .or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64))
        }
        _ => None,
    }
}

/// `22` and `22.0` are both the code 22; `22.5` is not a code.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn integral(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn result(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn keeps_numeric_fields_only() {
        let snap = StatusSnapshot::from_result(&result(json!({
            "ps": 1,
            "sp": 215,
            "kl": true,
            "cm": "0",
            "tw": 21.6,
            "pwd": "hunter2",
            "nested": { "a": 1 }
        })));

        assert_eq!(snap.get("ps"), Some(1));
        assert_eq!(snap.get("sp"), Some(215));
        assert_eq!(snap.get("kl"), Some(1));
        assert_eq!(snap.get("cm"), Some(0));
        assert_eq!(snap.value("tw"), Some(21.6));
        assert_eq!(snap.get("tw"), None);
        assert_eq!(snap.get("pwd"), None);
        assert_eq!(snap.get("nested"), None);
        assert_eq!(snap.len(), 5);
    }

    #[test]
    fn fractional_values_are_kept_exact() {
        let snap = StatusSnapshot::from_result(&result(json!({
            "t": 21.4,
            "sp": 22.5,
            "wm": 3.0,
            "ta": "20.5"
        })));

        assert_eq!(snap.value("t"), Some(21.4));
        assert_eq!(snap.value("sp"), Some(22.5));
        assert_eq!(snap.value("ta"), Some(20.5));
        assert_eq!(snap.get("sp"), None);
        assert_eq!(snap.get("wm"), Some(3));
        assert!(snap.is("wm", 3));
    }

    #[test]
    fn merge_returns_new_snapshot() {
        let before: StatusSnapshot = [("ps", 0), ("wm", 1)].into_iter().collect();
        let after = before.merged(&[(keys::POWER, 1), (keys::MODE, 3)]);

        assert!(before.is(keys::POWER, 0));
        assert!(after.is(keys::POWER, 1));
        assert!(after.is(keys::MODE, 3));
        assert!(!after.is(keys::FAN_SPEED, 0));
    }
}
