// ── AirLeaf ──
//
// Tenth-of-a-degree temperatures, a water probe, keyboard lock, and fan
// control through named functions. No louvre motor and no scheduling.

use std::sync::Arc;

use innova_api::Payload;
use tracing::debug;

use super::{Capabilities, DeviceState, set_mode_kind};
use crate::model::{FanSpeed, Function, Mode, ModeKind, ModeRegistry, TemperatureScale, keys};
use crate::transport::Transport;

const LOCK_ON: &str = "set/lock/on";
const LOCK_OFF: &str = "set/lock/off";

pub const MODES: ModeRegistry = ModeRegistry::new(&[
    Mode::new("set/mode/auto", 0, ModeKind::Auto),
    Mode::new("set/mode/heating", 3, ModeKind::Heat),
    Mode::new("set/mode/cooling", 5, ModeKind::Cool),
]);

const SCALE: TemperatureScale = TemperatureScale::TENTHS;

pub struct AirLeaf<T> {
    state: DeviceState<T>,
}

impl<T> AirLeaf<T> {
    pub const CAPABILITIES: Capabilities = Capabilities {
        swing: false,
        fan: true,
        preset: true,
        target_temp: true,
        keyboard_lock: true,
        water_temp: true,
        scheduling: false,
    };
}

#[allow(clippy::unused_self)]
impl<T: Transport> AirLeaf<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            state: DeviceState::new(transport, MODES),
        }
    }

    pub(crate) fn state(&self) -> &DeviceState<T> {
        &self.state
    }

    fn degrees(&self, key: &str) -> f64 {
        self.state.value(key).map_or(0.0, |raw| SCALE.decode(raw))
    }

    // ── Reads ──

    pub fn ambient_temperature(&self) -> f64 {
        self.degrees(keys::AMBIENT_TENTHS)
    }

    pub fn target_temperature(&self) -> f64 {
        self.degrees(keys::SETPOINT)
    }

    pub fn water_temperature(&self) -> f64 {
        self.degrees(keys::WATER)
    }

    pub fn temperature_step(&self) -> f64 {
        SCALE.step
    }

    /// Active function, if `fn` holds a known code.
    pub fn function(&self) -> Option<Function> {
        self.state.get(keys::FUNCTION).and_then(Function::from_code)
    }

    /// NIGHT (and anything unrecognised) reads as AUTO.
    pub fn fan_speed(&self) -> FanSpeed {
        self.function()
            .and_then(Function::fan_speed)
            .unwrap_or(FanSpeed::Auto)
    }

    pub fn supported_fan_speeds(&self) -> Vec<FanSpeed> {
        Function::fan_speeds()
    }

    /// No louvre motor.
    pub fn rotation(&self) -> bool {
        false
    }

    pub fn night_mode(&self) -> bool {
        self.function() == Some(Function::Night)
    }

    pub fn keyboard_locked(&self) -> bool {
        self.state.is(keys::KEYBOARD_LOCK, 1)
    }

    pub fn scheduling_mode(&self) -> bool {
        false
    }

    // ── Writes ──

    pub async fn set_temperature(&self, degrees: f64) -> bool {
        let Some(raw) = SCALE.encode(degrees) else {
            debug!(degrees, "setpoint is not a multiple of 0.5");
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
        let Some(function) = Function::for_speed(speed) else {
            debug!(%speed, "no function maps to this fan speed");
            return false;
        };
        self.apply_function(function).await
    }

    async fn apply_function(&self, function: Function) -> bool {
        self.state
            .send(function.command(), None, &[(keys::FUNCTION, function.code())])
            .await
    }

    #[allow(clippy::unused_async)]
    pub async fn rotation_on(&self) -> bool {
        false
    }

    #[allow(clippy::unused_async)]
    pub async fn rotation_off(&self) -> bool {
        false
    }

    pub async fn night_mode_on(&self) -> bool {
        self.apply_function(Function::Night).await
    }

    pub async fn night_mode_off(&self) -> bool {
        self.apply_function(Function::Auto).await
    }

    /// Heating and cooling need the unit running: when it is off, power it
    /// on first and give up if that fails.
    pub async fn set_mode(&self, kind: ModeKind) -> bool {
        if matches!(kind, ModeKind::Heat | ModeKind::Cool)
            && !self.state.power()
            && !self.state.power_on().await
        {
            return false;
        }
        set_mode_kind(&self.state, kind).await
    }

    pub async fn lock_keyboard(&self) -> bool {
        self.state.send(LOCK_ON, None, &[(keys::KEYBOARD_LOCK, 1)]).await
    }

    pub async fn unlock_keyboard(&self) -> bool {
        self.state.send(LOCK_OFF, None, &[(keys::KEYBOARD_LOCK, 0)]).await
    }

    #[allow(clippy::unused_async)]
    pub async fn scheduling_on(&self) -> bool {
        false
    }

    #[allow(clippy::unused_async)]
    pub async fn scheduling_off(&self) -> bool {
        false
    }
}
