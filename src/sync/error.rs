//! Sync error types.

use thiserror::Error;

/// Why a remote call did not succeed.
///
/// None of these lose guest data: a failed create still lands in the local
/// cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// No endpoint is configured for the selected mode
    #[error("No remote endpoint configured; saved on this device only")]
    NotConfigured,
    /// Failed to reach the endpoint
    #[error("Connection error: {0}")]
    Transport(String),
    /// The transport gave up waiting
    #[error("Request timed out")]
    Timeout,
    /// The relay refused the shared secret
    #[error("Unauthorized: shared secret was rejected")]
    Unauthorized,
    /// Non-success HTTP status
    #[error("Remote returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// Body was not the expected JSON
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// Remote answered but did not report `ok: true`
    #[error("Remote rejected the request: {0}")]
    Rejected(String),
    /// Payload could not be encoded
    #[error("Failed to encode payload: {0}")]
    Encode(String),
}

impl SyncError {
    /// True when the remote was reached and actively refused the secret.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SyncError::Unauthorized)
    }
}
