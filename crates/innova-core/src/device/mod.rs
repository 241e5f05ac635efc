// ── Device variants ──
//
// One variant per firmware family. Both expose the same uniform surface;
// `Device` is the closed sum of the two and forwards every call.
//
// Every write follows the same shape: encode the family's wire command,
// send it, and only on an acknowledged send merge the known delta into
// the snapshot. A failed send leaves the snapshot untouched.

pub mod air_leaf;
pub mod factory;
pub mod two_point_zero;

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use strum::Display;
use tracing::{debug, error};

use innova_api::{Payload, StatusDocument};

use crate::model::{
    DeviceIdentity, FanSpeed, MAX_TEMPERATURE, MIN_TEMPERATURE, Mode, ModeKind, ModeRegistry,
    StatusSnapshot, keys,
};
use crate::transport::Transport;

pub use air_leaf::AirLeaf;
pub use factory::resolve;
pub use two_point_zero::TwoPointZero;

pub(crate) const POWER_ON: &str = "power/on";
pub(crate) const POWER_OFF: &str = "power/off";
pub(crate) const SET_TEMPERATURE: &str = "set/setpoint";

/// Firmware generation of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum DeviceFamily {
    #[strum(serialize = "TwoPointZero")]
    TwoPointZero,
    #[strum(serialize = "AirLeaf")]
    AirLeaf,
}

impl DeviceFamily {
    /// Wire `deviceType` code.
    pub fn code(self) -> &'static str {
        match self {
            Self::TwoPointZero => "001",
            Self::AirLeaf => "002",
        }
    }
}

/// Which controls a family has, so callers know what to surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    pub swing: bool,
    pub fan: bool,
    pub preset: bool,
    pub target_temp: bool,
    pub keyboard_lock: bool,
    pub water_temp: bool,
    pub scheduling: bool,
}

// ── Shared state ────────────────────────────────────────────────────

/// Snapshot, identity and transport shared by both variants.
pub(crate) struct DeviceState<T> {
    transport: Arc<T>,
    registry: ModeRegistry,
    status: ArcSwap<StatusSnapshot>,
    identity: ArcSwap<DeviceIdentity>,
}

impl<T: Transport> DeviceState<T> {
    pub(crate) fn new(transport: Arc<T>, registry: ModeRegistry) -> Self {
        Self {
            transport,
            registry,
            status: ArcSwap::from_pointee(StatusSnapshot::default()),
            identity: ArcSwap::from_pointee(DeviceIdentity::default()),
        }
    }

    pub(crate) fn status(&self) -> Arc<StatusSnapshot> {
        self.status.load_full()
    }

    pub(crate) fn identity(&self) -> Arc<DeviceIdentity> {
        self.identity.load_full()
    }

    pub(crate) fn registry(&self) -> ModeRegistry {
        self.registry
    }

    pub(crate) fn get(&self, key: &str) -> Option<i64> {
        self.status.load().get(key)
    }

    pub(crate) fn value(&self, key: &str) -> Option<f64> {
        self.status.load().value(key)
    }

    pub(crate) fn is(&self, key: &str, value: i64) -> bool {
        self.status.load().is(key, value)
    }

    /// Replace snapshot and identity from a fetched document.
    pub(crate) fn ingest(&self, doc: &StatusDocument) -> bool {
        let Some(result) = doc.result.as_ref().filter(|_| doc.success) else {
            error!("status document reports failure or lacks RESULT");
            return false;
        };
        debug!(document = ?doc.redacted(), "ingesting status");
        self.status.store(Arc::new(StatusSnapshot::from_result(result)));
        self.identity.store(Arc::new(DeviceIdentity::from(doc)));
        true
    }

    /// Send `path`; on success merge `delta` into the snapshot.
    pub(crate) async fn send(
        &self,
        path: &str,
        payload: Option<Payload>,
        delta: &[(&str, i64)],
    ) -> bool {
        debug!(path, ?payload, "sending command");
        if !self.transport.send_command(path, payload.as_ref()).await {
            return false;
        }
        self.status.rcu(|current| current.merged(delta));
        true
    }

    // ── Reads common to every family ──

    pub(crate) fn power(&self) -> bool {
        self.is(keys::POWER, 1)
    }

    pub(crate) fn mode(&self) -> Mode {
        self.get(keys::MODE)
            .map_or(Mode::UNKNOWN, |code| self.registry.get_mode(code))
    }

    pub(crate) async fn power_on(&self) -> bool {
        self.send(POWER_ON, None, &[(keys::POWER, 1)]).await
    }

    pub(crate) async fn power_off(&self) -> bool {
        self.send(POWER_OFF, None, &[(keys::POWER, 0)]).await
    }
}

/// Select `mode`: one command, then power and mode are recorded together.
pub(crate) async fn set_mode<T: Transport>(state: &DeviceState<T>, mode: Mode) -> bool {
    state
        .send(
            mode.command(),
            None,
            &[(keys::POWER, 1), (keys::MODE, mode.code())],
        )
        .await
}

/// Resolve `kind` in the family registry and select it. Kinds the family
/// lacks fail without a command being sent.
pub(crate) async fn set_mode_kind<T: Transport>(state: &DeviceState<T>, kind: ModeKind) -> bool {
    match state.registry().find(kind) {
        Some(mode) => set_mode(state, mode).await,
        None => {
            debug!(%kind, "mode not supported by this family");
            false
        }
    }
}

// ── Device ──────────────────────────────────────────────────────────

/// A resolved unit of either family.
pub enum Device<T> {
    TwoPointZero(TwoPointZero<T>),
    AirLeaf(AirLeaf<T>),
}

macro_rules! dispatch {
    ($self:ident, $d:ident => $e:expr) => {
        match $self {
            Device::TwoPointZero($d) => $e,
            Device::AirLeaf($d) => $e,
        }
    };
}

impl<T: Transport> Device<T> {
    pub fn family(&self) -> DeviceFamily {
        match self {
            Self::TwoPointZero(_) => DeviceFamily::TwoPointZero,
            Self::AirLeaf(_) => DeviceFamily::AirLeaf,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            Self::TwoPointZero(_) => TwoPointZero::<T>::CAPABILITIES,
            Self::AirLeaf(_) => AirLeaf::<T>::CAPABILITIES,
        }
    }

    pub fn ingest(&self, doc: &StatusDocument) -> bool {
        dispatch!(self, d => d.state().ingest(doc))
    }

    pub fn status(&self) -> Arc<StatusSnapshot> {
        dispatch!(self, d => d.state().status())
    }

    pub fn identity(&self) -> Arc<DeviceIdentity> {
        dispatch!(self, d => d.state().identity())
    }

    // ── Reads ──

    pub fn ambient_temperature(&self) -> f64 {
        dispatch!(self, d => d.ambient_temperature())
    }

    pub fn target_temperature(&self) -> f64 {
        dispatch!(self, d => d.target_temperature())
    }

    pub fn water_temperature(&self) -> f64 {
        dispatch!(self, d => d.water_temperature())
    }

    pub fn temperature_step(&self) -> f64 {
        dispatch!(self, d => d.temperature_step())
    }

    pub fn min_temperature(&self) -> f64 {
        MIN_TEMPERATURE
    }

    pub fn max_temperature(&self) -> f64 {
        MAX_TEMPERATURE
    }

    pub fn power(&self) -> bool {
        dispatch!(self, d => d.state().power())
    }

    pub fn mode(&self) -> Mode {
        dispatch!(self, d => d.state().mode())
    }

    pub fn supported_modes(&self) -> &'static [Mode] {
        dispatch!(self, d => d.state().registry().supported_modes())
    }

    pub fn fan_speed(&self) -> FanSpeed {
        dispatch!(self, d => d.fan_speed())
    }

    pub fn supported_fan_speeds(&self) -> Vec<FanSpeed> {
        dispatch!(self, d => d.supported_fan_speeds())
    }

    pub fn rotation(&self) -> bool {
        dispatch!(self, d => d.rotation())
    }

    pub fn night_mode(&self) -> bool {
        dispatch!(self, d => d.night_mode())
    }

    pub fn keyboard_locked(&self) -> bool {
        dispatch!(self, d => d.keyboard_locked())
    }

    pub fn scheduling_mode(&self) -> bool {
        dispatch!(self, d => d.scheduling_mode())
    }

    // ── Writes ──

    pub async fn power_on(&self) -> bool {
        dispatch!(self, d => d.state().power_on().await)
    }

    pub async fn power_off(&self) -> bool {
        dispatch!(self, d => d.state().power_off().await)
    }

    pub async fn set_temperature(&self, degrees: f64) -> bool {
        dispatch!(self, d => d.set_temperature(degrees).await)
    }

    pub async fn set_fan_speed(&self, speed: FanSpeed) -> bool {
        dispatch!(self, d => d.set_fan_speed(speed).await)
    }

    pub async fn rotation_on(&self) -> bool {
        dispatch!(self, d => d.rotation_on().await)
    }

    pub async fn rotation_off(&self) -> bool {
        dispatch!(self, d => d.rotation_off().await)
    }

    pub async fn night_mode_on(&self) -> bool {
        dispatch!(self, d => d.night_mode_on().await)
    }

    pub async fn night_mode_off(&self) -> bool {
        dispatch!(self, d => d.night_mode_off().await)
    }

    pub async fn set_mode(&self, kind: ModeKind) -> bool {
        dispatch!(self, d => d.set_mode(kind).await)
    }

    pub async fn set_heating(&self) -> bool {
        self.set_mode(ModeKind::Heat).await
    }

    pub async fn set_cooling(&self) -> bool {
        self.set_mode(ModeKind::Cool).await
    }

    pub async fn set_dehumidifying(&self) -> bool {
        self.set_mode(ModeKind::Dehumidify).await
    }

    pub async fn set_fan_only(&self) -> bool {
        self.set_mode(ModeKind::FanOnly).await
    }

    pub async fn set_auto(&self) -> bool {
        self.set_mode(ModeKind::Auto).await
    }

    pub async fn lock_keyboard(&self) -> bool {
        dispatch!(self, d => d.lock_keyboard().await)
    }

    pub async fn unlock_keyboard(&self) -> bool {
        dispatch!(self, d => d.unlock_keyboard().await)
    }

    pub async fn scheduling_on(&self) -> bool {
        dispatch!(self, d => d.scheduling_on().await)
    }

    pub async fn scheduling_off(&self) -> bool {
        dispatch!(self, d => d.scheduling_off().await)
    }
}

impl<T> std::fmt::Debug for Device<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let family = match self {
            Self::TwoPointZero(_) => DeviceFamily::TwoPointZero,
            Self::AirLeaf(_) => DeviceFamily::AirLeaf,
        };
        f.debug_struct("Device").field("family", &family).finish_non_exhaustive()
    }
}
