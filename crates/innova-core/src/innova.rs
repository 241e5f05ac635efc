// ── Innova facade ──
//
// Single entry point for callers. Owns the transport and, after the first
// successful refresh, the resolved device. Every read has a safe default
// and every write fails without contacting the unit until then.

use std::sync::{Arc, OnceLock};

use tracing::{debug, error, info};

use innova_api::InnovaClient;

use crate::config::ConnectionConfig;
use crate::device::{self, Capabilities, Device, DeviceFamily};
use crate::error::CoreError;
use crate::model::{DeviceIdentity, FanSpeed, Mode, ModeKind, StatusSnapshot};
use crate::transport::Transport;

/// Step reported before any device is resolved.
const DEFAULT_STEP: f64 = 1.0;

/// Handle to one unit. Cheaply cloneable; clones share the resolved
/// device and its snapshot.
pub struct Innova<T = InnovaClient> {
    inner: Arc<InnovaInner<T>>,
}

struct InnovaInner<T> {
    transport: Arc<T>,
    device: OnceLock<Device<T>>,
}

impl<T> Clone for Innova<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Innova<InnovaClient> {
    /// Build a facade over the HTTP transport. Does not contact the unit;
    /// call [`refresh()`](Self::refresh) to resolve it.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, CoreError> {
        let client = InnovaClient::new(&config.connection, &config.transport())?;
        debug!(base_url = %client.base_url(), "created innova client");
        Ok(Self::new(client))
    }
}

impl<T: Transport> Innova<T> {
    pub fn new(transport: T) -> Self {
        Self::with_transport(Arc::new(transport))
    }

    pub fn with_transport(transport: Arc<T>) -> Self {
        Self {
            inner: Arc::new(InnovaInner {
                transport,
                device: OnceLock::new(),
            }),
        }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.inner.transport
    }

    /// The resolved device, if a refresh has succeeded.
    pub fn device(&self) -> Option<&Device<T>> {
        self.inner.device.get()
    }

    pub fn is_resolved(&self) -> bool {
        self.inner.device.get().is_some()
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Fetch status and fold it into the device, resolving the device on
    /// the first successful fetch. `false` on any failure.
    pub async fn refresh(&self) -> bool {
        self.refresh_checked().await.is_ok()
    }

    /// [`refresh()`](Self::refresh), reporting why it failed:
    /// [`CoreError::UnsupportedDevice`] for a type code no variant handles,
    /// [`CoreError::StatusUnavailable`] when no usable status arrived.
    pub async fn refresh_checked(&self) -> Result<(), CoreError> {
        let Some(doc) = self.inner.transport.fetch_status().await else {
            error!("unable to fetch unit status");
            return Err(CoreError::StatusUnavailable);
        };

        let device = match self.inner.device.get() {
            Some(device) => device,
            None => {
                let transport = Arc::clone(&self.inner.transport);
                match device::resolve(doc.device_type.as_deref(), transport) {
                    Ok(resolved) => {
                        info!(family = %resolved.family(), "resolved innova unit");
                        self.inner.device.get_or_init(|| resolved)
                    }
                    Err(e) => {
                        error!(error = %e, "cannot drive this unit");
                        return Err(e);
                    }
                }
            }
        };

        if device.ingest(&doc) {
            Ok(())
        } else {
            Err(CoreError::StatusUnavailable)
        }
    }

    // ── Identity ─────────────────────────────────────────────────────

    pub fn model(&self) -> Option<DeviceFamily> {
        self.device().map(Device::family)
    }

    pub fn identity(&self) -> Option<Arc<DeviceIdentity>> {
        self.device().map(Device::identity)
    }

    pub fn name(&self) -> Option<String> {
        self.identity().and_then(|i| i.name.clone())
    }

    pub fn serial(&self) -> Option<String> {
        self.identity().and_then(|i| i.serial.clone())
    }

    pub fn uid(&self) -> Option<String> {
        self.identity().and_then(|i| i.uid.clone())
    }

    pub fn software_version(&self) -> Option<String> {
        self.identity().and_then(|i| i.software_version.clone())
    }

    pub fn ip_address(&self) -> Option<String> {
        self.identity().and_then(|i| i.ip_address.clone())
    }

    /// Raw wire fields of the last known status. Empty when unresolved.
    pub fn snapshot(&self) -> Arc<StatusSnapshot> {
        self.device().map_or_else(Arc::default, Device::status)
    }

    // ── Capabilities ─────────────────────────────────────────────────

    pub fn capabilities(&self) -> Capabilities {
        self.device().map(Device::capabilities).unwrap_or_default()
    }

    pub fn supports_swing(&self) -> bool {
        self.capabilities().swing
    }

    pub fn supports_fan(&self) -> bool {
        self.capabilities().fan
    }

    pub fn supports_preset(&self) -> bool {
        self.capabilities().preset
    }

    pub fn supports_target_temp(&self) -> bool {
        self.capabilities().target_temp
    }

    pub fn supports_keyboard_lock(&self) -> bool {
        self.capabilities().keyboard_lock
    }

    pub fn supports_water_temp(&self) -> bool {
        self.capabilities().water_temp
    }

    pub fn supports_scheduling(&self) -> bool {
        self.capabilities().scheduling
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn ambient_temperature(&self) -> f64 {
        self.device().map_or(0.0, Device::ambient_temperature)
    }

    pub fn target_temperature(&self) -> f64 {
        self.device().map_or(0.0, Device::target_temperature)
    }

    pub fn water_temperature(&self) -> f64 {
        self.device().map_or(0.0, Device::water_temperature)
    }

    pub fn temperature_step(&self) -> f64 {
        self.device().map_or(DEFAULT_STEP, Device::temperature_step)
    }

    pub fn min_temperature(&self) -> f64 {
        self.device().map_or(0.0, Device::min_temperature)
    }

    pub fn max_temperature(&self) -> f64 {
        self.device().map_or(0.0, Device::max_temperature)
    }

    pub fn power(&self) -> bool {
        self.device().is_some_and(Device::power)
    }

    pub fn mode(&self) -> Mode {
        self.device().map_or(Mode::UNKNOWN, Device::mode)
    }

    pub fn supported_modes(&self) -> &'static [Mode] {
        self.device().map(Device::supported_modes).unwrap_or_default()
    }

    pub fn fan_speed(&self) -> FanSpeed {
        self.device().map_or(FanSpeed::Auto, Device::fan_speed)
    }

    pub fn supported_fan_speeds(&self) -> Vec<FanSpeed> {
        self.device().map(Device::supported_fan_speeds).unwrap_or_default()
    }

    pub fn rotation(&self) -> bool {
        self.device().is_some_and(Device::rotation)
    }

    pub fn night_mode(&self) -> bool {
        self.device().is_some_and(Device::night_mode)
    }

    pub fn keyboard_locked(&self) -> bool {
        self.device().is_some_and(Device::keyboard_locked)
    }

    pub fn scheduling_mode(&self) -> bool {
        self.device().is_some_and(Device::scheduling_mode)
    }

    // ── Writes ───────────────────────────────────────────────────────

    pub async fn power_on(&self) -> bool {
        match self.device() {
            Some(d) => d.power_on().await,
            None => unresolved("power_on"),
        }
    }

    pub async fn power_off(&self) -> bool {
        match self.device() {
            Some(d) => d.power_off().await,
            None => unresolved("power_off"),
        }
    }

    pub async fn set_temperature(&self, degrees: f64) -> bool {
        match self.device() {
            Some(d) => d.set_temperature(degrees).await,
            None => unresolved("set_temperature"),
        }
    }

    pub async fn set_fan_speed(&self, speed: FanSpeed) -> bool {
        match self.device() {
            Some(d) => d.set_fan_speed(speed).await,
            None => unresolved("set_fan_speed"),
        }
    }

    pub async fn rotation_on(&self) -> bool {
        match self.device() {
            Some(d) => d.rotation_on().await,
            None => unresolved("rotation_on"),
        }
    }

    pub async fn rotation_off(&self) -> bool {
        match self.device() {
            Some(d) => d.rotation_off().await,
            None => unresolved("rotation_off"),
        }
    }

    pub async fn night_mode_on(&self) -> bool {
        match self.device() {
            Some(d) => d.night_mode_on().await,
            None => unresolved("night_mode_on"),
        }
    }

    pub async fn night_mode_off(&self) -> bool {
        match self.device() {
            Some(d) => d.night_mode_off().await,
            None => unresolved("night_mode_off"),
        }
    }

    /// Select the family's mode of `kind`. `false` if the family has none.
    pub async fn set_mode(&self, kind: ModeKind) -> bool {
        match self.device() {
            Some(d) => d.set_mode(kind).await,
            None => unresolved("set_mode"),
        }
    }

    pub async fn set_heating(&self) -> bool {
        match self.device() {
            Some(d) => d.set_heating().await,
            None => unresolved("set_heating"),
        }
    }

    pub async fn set_cooling(&self) -> bool {
        match self.device() {
            Some(d) => d.set_cooling().await,
            None => unresolved("set_cooling"),
        }
    }

    pub async fn set_dehumidifying(&self) -> bool {
        match self.device() {
            Some(d) => d.set_dehumidifying().await,
            None => unresolved("set_dehumidifying"),
        }
    }

    pub async fn set_fan_only(&self) -> bool {
        match self.device() {
            Some(d) => d.set_fan_only().await,
            None => unresolved("set_fan_only"),
        }
    }

    pub async fn set_auto(&self) -> bool {
        match self.device() {
            Some(d) => d.set_auto().await,
            None => unresolved("set_auto"),
        }
    }

    pub async fn lock_keyboard(&self) -> bool {
        match self.device() {
            Some(d) => d.lock_keyboard().await,
            None => unresolved("lock_keyboard"),
        }
    }

    pub async fn unlock_keyboard(&self) -> bool {
        match self.device() {
            Some(d) => d.unlock_keyboard().await,
            None => unresolved("unlock_keyboard"),
        }
    }

    pub async fn scheduling_on(&self) -> bool {
        match self.device() {
            Some(d) => d.scheduling_on().await,
            None => unresolved("scheduling_on"),
        }
    }

    pub async fn scheduling_off(&self) -> bool {
        match self.device() {
            Some(d) => d.scheduling_off().await,
            None => unresolved("scheduling_off"),
        }
    }
}

fn unresolved(operation: &'static str) -> bool {
    debug!(operation, "unit not resolved yet, refresh first");
    false
}

impl<T> std::fmt::Debug for Innova<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Innova")
            .field("device", &self.inner.device.get())
            .finish_non_exhaustive()
    }
}
