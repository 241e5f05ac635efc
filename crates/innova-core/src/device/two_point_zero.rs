// ── TwoPointZero ──
//
// Whole-degree temperatures, a direct fan-speed command, louvre rotation,
// a dedicated night-mode toggle and weekly scheduling. No keyboard lock
// and no water probe.

use std::sync::Arc;

use innova_api::Payload;
use tracing::debug;

use super::{Capabilities, DeviceState, set_mode_kind};
use crate::model::{FanSpeed, FanSpeedTable, Mode, ModeKind, ModeRegistry, TemperatureScale, keys};
use crate::transport::Transport;

const SET_FAN_SPEED: &str = "set/fan";
const SET_ROTATION: &str = "set/feature/rotation";
const SET_NIGHT_MODE: &str = "set/feature/night";
const CALENDAR_ON: &str = "set/calendar/on";
const CALENDAR_OFF: &str = "set/calendar/off";

/// `fr` values. ON is zero; OFF is seven, not one.
pub const ROTATION_ON: i64 = 0;
pub const ROTATION_OFF: i64 = 7;

pub const NIGHT_MODE_ON: i64 = 1;
pub const NIGHT_MODE_OFF: i64 = 0;

pub const MODES: ModeRegistry = ModeRegistry::new(&[
    Mode::new("set/mode/heating", 0, ModeKind::Heat),
    Mode::new("set/mode/cooling", 1, ModeKind::Cool),
    Mode::new("set/mode/dehumidification", 3, ModeKind::Dehumidify),
    Mode::new("set/mode/fanonly", 4, ModeKind::FanOnly),
    Mode::new("set/mode/auto", 5, ModeKind::Auto),
]);

pub const FAN_SPEEDS: FanSpeedTable = FanSpeedTable::new(&[
    (FanSpeed::Auto, 0),
    (FanSpeed::Low, 1),
    (FanSpeed::Medium, 2),
    (FanSpeed::High, 3),
]);

const SCALE: TemperatureScale = TemperatureScale::WHOLE_DEGREES;

pub struct TwoPointZero<T> {
    state: DeviceState<T>,
}

impl<T> TwoPointZero<T> {
    pub const CAPABILITIES: Capabilities = Capabilities {
        swing: true,
        fan: true,
        preset: true,
        target_temp: true,
        keyboard_lock: false,
        water_temp: false,
        scheduling: true,
    };
}

#[allow(clippy::unused_self)]
impl<T: Transport> TwoPointZero<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            state: DeviceState::new(transport, MODES),
        }
    }

    pub(crate) fn state(&self) -> &DeviceState<T> {
        &self.state
    }

    // ── Reads ──

    pub fn ambient_temperature(&self) -> f64 {
        self.state.value(keys::AMBIENT).map_or(0.0, |raw| SCALE.decode(raw))
    }

    pub fn target_temperature(&self) -> f64 {
        self.state.value(keys::SETPOINT).map_or(0.0, |raw| SCALE.decode(raw))
    }

    /// No water probe on this family.
    pub fn water_temperature(&self) -> f64 {
        0.0
    }

    pub fn temperature_step(&self) -> f64 {
        SCALE.step
    }

    pub fn fan_speed(&self) -> FanSpeed {
        self.state
            .get(keys::FAN_SPEED)
            .map_or(FanSpeed::Auto, |code| FAN_SPEEDS.decode(code))
    }

    pub fn supported_fan_speeds(&self) -> Vec<FanSpeed> {
        FAN_SPEEDS.speeds()
    }

    pub fn rotation(&self) -> bool {
        self.state.is(keys::ROTATION, ROTATION_ON)
    }

    pub fn night_mode(&self) -> bool {
        self.state.is(keys::NIGHT_MODE, NIGHT_MODE_ON)
    }

    pub fn keyboard_locked(&self) -> bool {
        false
    }

    pub fn scheduling_mode(&self) -> bool {
        self.state.is(keys::CALENDAR, 1)
    }

    // ── Writes ──

    pub async fn set_temperature(&self, degrees: f64) -> bool {
        let Some(raw) = SCALE.encode(degrees) else {
            debug!(degrees, "setpoint is not a whole degree");
            return false;
        };
        self.state
            .send(
                super::SET_TEMPERATURE,
                Some(Payload::form("p_temp", raw)),
                &[(keys::SETPOINT, raw)],
            )
            .await
    }

    pub async fn set_fan_speed(&self, speed: FanSpeed) -> bool {
        let Some(code) = FAN_SPEEDS.encode(speed) else {
            debug!(%speed, "fan speed not supported");
            return false;
        };
        self.state
            .send(
                SET_FAN_SPEED,
                Some(Payload::form("value", code)),
                &[(keys::FAN_SPEED, code)],
            )
            .await
    }

    pub async fn rotation_on(&self) -> bool {
        self.set_rotation(ROTATION_ON).await
    }

    pub async fn rotation_off(&self) -> bool {
        self.set_rotation(ROTATION_OFF).await
    }

    async fn set_rotation(&self, value: i64) -> bool {
        self.state
            .send(
                SET_ROTATION,
                Some(Payload::form("value", value)),
                &[(keys::ROTATION, value)],
            )
            .await
    }

    /// Night mode also drops the fan to LOW on the unit; the snapshot
    /// records both.
    pub async fn night_mode_on(&self) -> bool {
        let low = FAN_SPEEDS.encode(FanSpeed::Low).unwrap_or(1);
        self.state
            .send(
                SET_NIGHT_MODE,
                Some(Payload::form("value", NIGHT_MODE_ON)),
                &[(keys::NIGHT_MODE, NIGHT_MODE_ON), (keys::FAN_SPEED, low)],
            )
            .await
    }

    pub async fn night_mode_off(&self) -> bool {
        self.state
            .send(
                SET_NIGHT_MODE,
                Some(Payload::form("value", NIGHT_MODE_OFF)),
                &[(keys::NIGHT_MODE, NIGHT_MODE_OFF)],
            )
            .await
    }

    pub async fn set_mode(&self, kind: ModeKind) -> bool {
        set_mode_kind(&self.state, kind).await
    }

    #[allow(clippy::unused_async)]
    pub async fn lock_keyboard(&self) -> bool {
        false
    }

    #[allow(clippy::unused_async)]
    pub async fn unlock_keyboard(&self) -> bool {
        false
    }

    pub async fn scheduling_on(&self) -> bool {
        self.state.send(CALENDAR_ON, None, &[(keys::CALENDAR, 1)]).await
    }

    pub async fn scheduling_off(&self) -> bool {
        self.state.send(CALENDAR_OFF, None, &[(keys::CALENDAR, 0)]).await
    }
}
