use std::time::Duration;

use contact_logging::contact_debug;
use reqwest::header::CONTENT_TYPE;

use crate::{ContactRequest, FailureKind, SubmitError, SubmitReceipt};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/send-email";
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    /// Absolute URL of the `/send-email` endpoint.
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl SubmitSettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, request: &ContactRequest) -> Result<SubmitReceipt, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Result<Self, SubmitError> {
        let endpoint = parse_endpoint(&settings.endpoint)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { endpoint, client })
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(&self, request: &ContactRequest) -> Result<SubmitReceipt, SubmitError> {
        let body = serde_json::to_vec(request)
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let payload = response.bytes().await.map_err(map_reqwest_error)?;
        let body: serde_json::Value = serde_json::from_slice(&payload).map_err(|err| {
            SubmitError::new(
                FailureKind::MalformedBody {
                    status: status.as_u16(),
                },
                err.to_string(),
            )
        })?;

        if status.is_success() {
            contact_debug!("Endpoint accepted submission with status {}", status);
            return Ok(SubmitReceipt {
                status: status.as_u16(),
            });
        }

        Err(SubmitError::new(
            FailureKind::Rejected {
                status: status.as_u16(),
                reason: rejection_reason(body),
            },
            status.to_string(),
        ))
    }
}

/// Checks that `raw` is an absolute http(s) URL usable as the email endpoint.
pub fn parse_endpoint(raw: &str) -> Result<reqwest::Url, SubmitError> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|err| SubmitError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SubmitError::new(
            FailureKind::InvalidEndpoint,
            format!("unsupported scheme {other}"),
        )),
    }
}

/// Extracts a displayable `message` from a JSON error body; anything else yields `None`.
fn rejection_reason(body: serde_json::Value) -> Option<String> {
    match body.get("message")? {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        _ => None,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(FailureKind::Timeout, err.to_string());
    }
    SubmitError::new(FailureKind::Network, err.to_string())
}
