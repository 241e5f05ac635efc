// ── Temperature scales ──
//
// Units report temperatures in wire units: whole degrees on TwoPointZero,
// tenths of a degree on AirLeaf. Conversion happens only here.

/// Setpoint bounds shared by both families.
pub const MIN_TEMPERATURE: f64 = 16.0;
pub const MAX_TEMPERATURE: f64 = 31.0;

const STEP_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureScale {
    /// Wire units per degree.
    pub factor: i64,
    /// Smallest settable increment, in degrees.
    pub step: f64,
}

impl TemperatureScale {
    pub const WHOLE_DEGREES: Self = Self {
        factor: 1,
        step: 1.0,
    };

    pub const TENTHS: Self = Self {
        factor: 10,
        step: 0.5,
    };

    /// Degrees for a raw wire value. Fractional raw values pass through.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn decode(&self, raw: f64) -> f64 {
        raw / self.factor as f64
    }

    /// Wire value for `degrees`, or `None` when it is not finite or not a
    /// whole multiple of `step`. Bounds are not checked.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::as_conversions
    )]
    pub fn encode(&self, degrees: f64) -> Option<i64> {
        if !degrees.is_finite() {
            return None;
        }
        let steps = degrees / self.step;
        if (steps - steps.round()).abs() > STEP_TOLERANCE {
            return None;
        }
        Some((degrees * self.factor as f64).round() as i64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tenths_round_trip() {
        let scale = TemperatureScale::TENTHS;
        assert_eq!(scale.encode(21.5), Some(215));
        assert!((scale.decode(215.0) - 21.5).abs() < f64::EPSILON);

        let mut t = MIN_TEMPERATURE;
        while t <= MAX_TEMPERATURE {
            let raw = scale.encode(t);
            assert_eq!(raw.map(|r| scale.decode(f64::from(i32::try_from(r).unwrap()))), Some(t));
            t += scale.step;
        }
    }

    #[test]
    fn whole_degrees() {
        let scale = TemperatureScale::WHOLE_DEGREES;
        assert_eq!(scale.encode(22.0), Some(22));
        assert!((scale.decode(22.0) - 22.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fractional_raw_values_pass_through() {
        let whole = TemperatureScale::WHOLE_DEGREES;
        assert!((whole.decode(22.5) - 22.5).abs() < f64::EPSILON);
        assert!((TemperatureScale::TENTHS.decode(215.5) - 21.55).abs() < 1e-9);
    }

    #[test]
    fn off_step_values_are_rejected() {
        assert_eq!(TemperatureScale::WHOLE_DEGREES.encode(21.5), None);
        assert_eq!(TemperatureScale::TENTHS.encode(21.3), None);
        assert_eq!(TemperatureScale::TENTHS.encode(f64::NAN), None);
        assert_eq!(TemperatureScale::TENTHS.encode(f64::INFINITY), None);
    }

    #[test]
    fn bounds_are_not_enforced() {
        assert_eq!(TemperatureScale::WHOLE_DEGREES.encode(40.0), Some(40));
    }
}
