// Innova unit HTTP client
//
// Wraps `reqwest::Client` with URL construction, the `{ success: bool }`
// envelope check, and the bounded retry policy shared by commands and
// status fetches.

use std::future::Future;

use serde::Deserialize;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::Error;
use crate::status::{StatusDocument, redact_body};
use crate::transport::{Connection, RetryPolicy, TransportConfig};

/// Path of the status endpoint, relative to the API root.
pub const STATUS_PATH: &str = "status";

/// Request body of a command. The firmware accepts either encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    /// `application/json` body.
    Json(serde_json::Value),
}

impl Payload {
    /// Single-field form payload, the shape every setter uses.
    pub fn form(key: &str, value: impl ToString) -> Self {
        Self::Form(vec![(key.to_owned(), value.to_string())])
    }
}

/// Every command answers with this envelope.
#[derive(Deserialize)]
struct CommandResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Raw HTTP client for one Innova unit.
///
/// All methods return unwrapped results; the envelope is checked before
/// the caller sees anything.
#[derive(Debug, Clone)]
pub struct InnovaClient {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl InnovaClient {
    /// Create a client for the given connection mode.
    pub fn new(connection: &Connection, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = connection.base_url()?;
        debug!(
            base_url = %base_url,
            local = connection.is_local(),
            "building innova client"
        );
        let http = transport.build_client(connection)?;
        Ok(Self {
            http,
            base_url,
            retry: transport.retry,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` and API root.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{path}`.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Send a command.
    ///
    /// `POST {base}/{path}` with an optional form or JSON body. Succeeds
    /// only on HTTP 200 with `"success": true`.
    pub async fn send_command(&self, path: &str, payload: Option<&Payload>) -> Result<(), Error> {
        let url = self.url(path)?;
        self.retrying(|| self.post_once(url.clone(), payload)).await
    }

    /// Fetch the unit status.
    ///
    /// `GET {base}/status`. The document must report success and carry
    /// `RESULT`, otherwise the call fails with [`Error::Rejected`].
    pub async fn status(&self) -> Result<StatusDocument, Error> {
        let url = self.url(STATUS_PATH)?;
        self.retrying(|| self.get_status_once(url.clone())).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn post_once(&self, url: Url, payload: Option<&Payload>) -> Result<(), Error> {
        debug!("POST {}", url);

        let builder = self.http.post(url);
        let builder = match payload {
            Some(Payload::Form(fields)) => builder.form(fields),
            Some(Payload::Json(body)) => builder.json(body),
            None => builder,
        };
        let resp = builder.send().await.map_err(Error::Transport)?;

        let body = read_body(resp).await?;
        let envelope: CommandResponse = parse_json(&body)?;
        if envelope.success {
            Ok(())
        } else {
            Err(Error::Rejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| "success=false".to_owned()),
            })
        }
    }

    async fn get_status_once(&self, url: Url) -> Result<StatusDocument, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let body = read_body(resp).await?;
        let doc: StatusDocument = parse_json(&body)?;
        if doc.is_usable() {
            Ok(doc)
        } else {
            Err(Error::Rejected {
                message: format!(
                    "status without success/RESULT: {}",
                    preview(&redact_body(&body))
                ),
            })
        }
    }

    /// Run `op` up to `retry.attempts` times, pausing `retry.delay` between
    /// attempts. Only transient errors are retried.
    async fn retrying<T, F, Fut>(&self, mut op: F) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < attempts => {
                    warn!(attempt, error = %e, "request failed, retrying");
                    tokio::time::sleep(self.retry.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

async fn read_body(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();
    if status != reqwest::StatusCode::OK {
        return Err(Error::Status {
            status: status.as_u16(),
        });
    }
    let body = resp.text().await.map_err(Error::Transport)?;
    trace!(len = body.len(), "response body received");
    Ok(body)
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        let body = redact_body(body);
        Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        }
    })
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_dropping_version_segment() {
        let client = InnovaClient::with_client(
            reqwest::Client::new(),
            Url::parse(crate::transport::CLOUD_API_URL).unwrap(),
        );
        let url = String::from(client.url("set/mode/heating").unwrap());
        assert_eq!(url, "http://innovaenergie.cloud/api/v/1/set/mode/heating");
    }

    #[test]
    fn single_field_form_payload() {
        assert_eq!(
            Payload::form("p_temp", 215),
            Payload::Form(vec![("p_temp".into(), "215".into())])
        );
    }
}
