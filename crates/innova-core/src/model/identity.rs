// ── Device identity ──
//
// The less volatile part of a status document. Refreshed on every fetch,
// never touched by write operations.

use serde::Serialize;

use innova_api::StatusDocument;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceIdentity {
    pub name: Option<String>,
    pub serial: Option<String>,
    /// MAC address.
    pub uid: Option<String>,
    pub software_version: Option<String>,
    pub ip_address: Option<String>,
}

impl From<&StatusDocument> for DeviceIdentity {
    fn from(doc: &StatusDocument) -> Self {
        Self {
            name: doc.setup.as_ref().and_then(|s| s.name.clone()),
            serial: doc.setup.as_ref().and_then(|s| s.serial.clone()),
            uid: doc.uid.clone(),
            software_version: doc.sw.as_ref().and_then(|s| s.version.clone()),
            ip_address: doc.net.as_ref().and_then(|n| n.ip.clone()),
        }
    }
}
