// ── Transport capability ──
//
// The only thing the device layer needs from the network: send a command
// and learn whether it worked, or fetch the status document. Failures of
// any kind (timeouts, refused connections, `success: false`) arrive as
// `false` / `None`; retries have already happened below this line.

use std::future::Future;

use tracing::warn;

use innova_api::{InnovaClient, Payload, StatusDocument};

pub trait Transport: Send + Sync {
    /// `true` iff the unit acknowledged the command.
    fn send_command(
        &self,
        path: &str,
        payload: Option<&Payload>,
    ) -> impl Future<Output = bool> + Send;

    /// The status document, or `None` on failure.
    fn fetch_status(&self) -> impl Future<Output = Option<StatusDocument>> + Send;
}

impl Transport for InnovaClient {
    async fn send_command(&self, path: &str, payload: Option<&Payload>) -> bool {
        match InnovaClient::send_command(self, path, payload).await {
            Ok(()) => true,
            Err(e) => {
                warn!(path, error = %e, "command failed");
                false
            }
        }
    }

    async fn fetch_status(&self) -> Option<StatusDocument> {
        match self.status().await {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(error = %e, "status fetch failed");
                None
            }
        }
    }
}
