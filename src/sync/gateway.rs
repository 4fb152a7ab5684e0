//! Best-effort delivery of entries to the spreadsheet backend.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::error::SyncError;
use super::protocol::RemoteRequest;
use crate::config::SyncConfig;
use crate::models::Entry;

/// Where submissions are posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMode {
    /// Through the authenticated relay (`rsvp-relay`)
    #[default]
    Relay,
    /// Straight to the spreadsheet web app
    Direct,
}

impl fmt::Display for SubmitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitMode::Relay => write!(f, "relay"),
            SubmitMode::Direct => write!(f, "direct"),
        }
    }
}

impl FromStr for SubmitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relay" => Ok(SubmitMode::Relay),
            "direct" => Ok(SubmitMode::Direct),
            _ => Err(format!(
                "Invalid submit mode '{}'. Valid options: relay, direct",
                s
            )),
        }
    }
}

/// How a submission ended up being stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend confirmed the write.
    Remote,
    /// The remote write failed; the entry is kept on this device only.
    LocalFallback(SyncError),
}

impl SubmitOutcome {
    pub fn is_remote(&self) -> bool {
        matches!(self, SubmitOutcome::Remote)
    }
}

/// Sends entries to the configured endpoint.
///
/// Each call is a single attempt. Nothing is retried or de-duplicated.
#[derive(Debug, Clone)]
pub struct SyncGateway {
    mode: SubmitMode,
    endpoint: Option<String>,
    secret: String,
    client: reqwest::Client,
}

impl SyncGateway {
    pub fn new(mode: SubmitMode, endpoint: Option<String>, secret: impl Into<String>) -> Self {
        Self {
            mode,
            endpoint: endpoint.filter(|url| !url.trim().is_empty()),
            secret: secret.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Creates a gateway for the endpoint matching the configured mode.
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(
            config.mode,
            config.endpoint().map(str::to_string),
            config.secret.clone().unwrap_or_default(),
        )
    }

    pub fn mode(&self) -> SubmitMode {
        self.mode
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Posts a new entry.
    ///
    /// Any failure is folded into [`SubmitOutcome::LocalFallback`] so the
    /// caller always has somewhere to put the entry.
    pub async fn submit(&self, entry: &Entry) -> SubmitOutcome {
        let data = match serde_json::to_value(entry) {
            Ok(data) => data,
            Err(e) => return SubmitOutcome::LocalFallback(SyncError::Encode(e.to_string())),
        };

        match self.send(&RemoteRequest::create(&self.secret, data)).await {
            Ok(_) => SubmitOutcome::Remote,
            Err(e) => SubmitOutcome::LocalFallback(e),
        }
    }

    /// Asks the backend to drop the row with the given entry id.
    pub async fn delete(&self, id: Uuid) -> Result<(), SyncError> {
        self.send(&RemoteRequest::delete(&self.secret, id.to_string()))
            .await
            .map(|_| ())
    }

    /// Fetches the backend's view of all responses.
    ///
    /// The reply is returned as-is.
    pub async fn list(&self) -> Result<Value, SyncError> {
        self.send(&RemoteRequest::list(&self.secret)).await
    }

    async fn send(&self, request: &RemoteRequest) -> Result<Value, SyncError> {
        let endpoint = self.endpoint.as_deref().ok_or(SyncError::NotConfigured)?;

        tracing::debug!(
            "Posting {} request to {} ({})",
            request.action(),
            endpoint,
            self.mode
        );

        let response = self
            .client
            .post(endpoint)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SyncError::Unauthorized);
        }

        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(body);
            return Err(SyncError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let reply: Value =
            serde_json::from_str(&body).map_err(|e| SyncError::Malformed(e.to_string()))?;

        if reply.get("ok") != Some(&Value::Bool(true)) {
            let message = reply
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("remote did not report ok")
                .to_string();
            return Err(SyncError::Rejected(message));
        }

        Ok(reply)
    }
}

fn transport_error(e: reqwest::Error) -> SyncError {
    if e.is_timeout() {
        SyncError::Timeout
    } else {
        SyncError::Transport(e.to_string())
    }
}
