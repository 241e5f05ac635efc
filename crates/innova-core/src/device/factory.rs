// ── Variant selection ──
//
// Maps the `deviceType` code of a status document to a device variant.
// Units too old to report a type are TwoPointZero.

use std::sync::Arc;

use tracing::debug;

use super::{AirLeaf, Device, DeviceFamily, TwoPointZero};
use crate::error::CoreError;
use crate::transport::Transport;

/// Family for a `deviceType` code. Absent or empty means TwoPointZero.
pub fn family_for(type_code: Option<&str>) -> Result<DeviceFamily, CoreError> {
    match type_code.map(str::trim) {
        None | Some("") => Ok(DeviceFamily::TwoPointZero),
        Some(code) if code == DeviceFamily::TwoPointZero.code() => Ok(DeviceFamily::TwoPointZero),
        Some(code) if code == DeviceFamily::AirLeaf.code() => Ok(DeviceFamily::AirLeaf),
        Some(code) => Err(CoreError::UnsupportedDevice {
            code: code.to_owned(),
        }),
    }
}

/// Build the variant for `type_code` around `transport`.
pub fn resolve<T: Transport>(
    type_code: Option<&str>,
    transport: Arc<T>,
) -> Result<Device<T>, CoreError> {
    let family = family_for(type_code)?;
    debug!(%family, ?type_code, "resolved device family");
    Ok(match family {
        DeviceFamily::TwoPointZero => Device::TwoPointZero(TwoPointZero::new(transport)),
        DeviceFamily::AirLeaf => Device::AirLeaf(AirLeaf::new(transport)),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;

    fn family(code: Option<&str>) -> Result<DeviceFamily, CoreError> {
        resolve(code, Arc::new(FakeTransport::succeeding())).map(|d| d.family())
    }

    #[test]
    fn known_codes() {
        assert_eq!(family(Some("001")).unwrap(), DeviceFamily::TwoPointZero);
        assert_eq!(family(Some("002")).unwrap(), DeviceFamily::AirLeaf);
    }

    #[test]
    fn missing_code_defaults_to_two_point_zero() {
        assert_eq!(family(None).unwrap(), DeviceFamily::TwoPointZero);
        assert_eq!(family(Some("")).unwrap(), DeviceFamily::TwoPointZero);
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = family(Some("003")).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedDevice { ref code } if code == "003"));
    }

    #[test]
    fn capabilities_follow_family() {
        let device = resolve(Some("002"), Arc::new(FakeTransport::succeeding())).unwrap();
        let caps = device.capabilities();
        assert!(caps.keyboard_lock && caps.water_temp);
        assert!(!caps.swing && !caps.scheduling);

        let device = resolve(Some("001"), Arc::new(FakeTransport::succeeding())).unwrap();
        let caps = device.capabilities();
        assert!(caps.swing && caps.scheduling);
        assert!(!caps.keyboard_lock && !caps.water_temp);
    }
}
