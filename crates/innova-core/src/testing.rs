// In-memory transport for unit tests: records every command and answers
// from a scripted queue.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use innova_api::{Payload, StatusDocument};

use crate::transport::Transport;

#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    /// Scripted send outcomes; `default_ok` once exhausted.
    outcomes: Mutex<VecDeque<bool>>,
    default_ok: bool,
    status: Mutex<Option<StatusDocument>>,
    sent: Mutex<Vec<(String, Option<Payload>)>>,
    fetches: Mutex<usize>,
}

#[allow(clippy::unwrap_used)]
impl FakeTransport {
    pub(crate) fn succeeding() -> Self {
        Self {
            default_ok: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self::default()
    }

    /// Answer the next sends with `outcomes`, in order.
    pub(crate) fn script(self, outcomes: &[bool]) -> Self {
        self.outcomes.lock().unwrap().extend(outcomes);
        self
    }

    pub(crate) fn with_status(self, doc: Value) -> Self {
        self.set_status(doc);
        self
    }

    pub(crate) fn set_status(&self, doc: Value) {
        *self.status.lock().unwrap() = Some(serde_json::from_value(doc).unwrap());
    }

    pub(crate) fn clear_status(&self) {
        *self.status.lock().unwrap() = None;
    }

    pub(crate) fn sent(&self) -> Vec<(String, Option<Payload>)> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.sent().into_iter().map(|(path, _)| path).collect()
    }

    pub(crate) fn fetches(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[allow(clippy::unwrap_used)]
impl Transport for FakeTransport {
    async fn send_command(&self, path: &str, payload: Option<&Payload>) -> bool {
        self.sent
            .lock()
            .unwrap()
            .push((path.to_owned(), payload.cloned()));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default_ok)
    }

    async fn fetch_status(&self) -> Option<StatusDocument> {
        *self.fetches.lock().unwrap() += 1;
        self.status.lock().unwrap().clone()
    }
}

/// A successful status document around `result`.
pub(crate) fn status_doc(device_type: &str, result: Value) -> Value {
    serde_json::json!({
        "success": true,
        "deviceType": device_type,
        "RESULT": result,
    })
}
