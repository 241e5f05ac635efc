// Wire types for the `GET status` document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under `RESULT` holding the unit's Wi-Fi password.
pub const PASSWORD_KEY: &str = "pwd";

/// Replacement value written over [`PASSWORD_KEY`] before logging.
pub const REDACTED: &str = "__OBFUSCATED__";

/// Top-level status document returned by `GET {base}/status`.
///
/// Only the fields the library reads are typed; everything else is kept
/// in `extra` so diagnostics can show the full payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusDocument {
    #[serde(default)]
    pub success: bool,

    /// The volatile status fields (`ps`, `wm`, `sp`, `ta`, ...).
    #[serde(rename = "RESULT", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Map<String, Value>>,

    /// MAC address of the unit.
    #[serde(rename = "UID", default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Firmware family code (`"001"`, `"002"`).
    #[serde(rename = "deviceType", default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<Setup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sw: Option<Software>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net: Option<Network>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Software {
    #[serde(rename = "V", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl StatusDocument {
    /// A document is usable when the unit reported success and sent `RESULT`.
    pub fn is_usable(&self) -> bool {
        self.success && self.result.is_some()
    }

    /// Copy of this document with the password masked. Log this, never `self`.
    pub fn redacted(&self) -> Self {
        let mut doc = self.clone();
        if let Some(result) = doc.result.as_mut() {
            if result.contains_key(PASSWORD_KEY) {
                result.insert(PASSWORD_KEY.to_owned(), Value::String(REDACTED.to_owned()));
            }
        }
        doc
    }
}

/// Raw status body with `RESULT.pwd` masked, for error messages and logs.
///
/// A body that is not JSON cannot be masked field-wise; it is withheld
/// entirely if it mentions the password key.
pub fn redact_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(mut value) => {
            if let Some(pwd) = value
                .get_mut("RESULT")
                .and_then(|result| result.get_mut(PASSWORD_KEY))
            {
                *pwd = Value::String(REDACTED.to_owned());
            }
            value.to_string()
        }
        Err(_) if body.contains(PASSWORD_KEY) => "<withheld: unparsable body>".to_owned(),
        Err(_) => body.to_owned(),
    }
}
