//! Relay configuration.
//!
//! Environment variables:
//! - `RSVP_RELAY_PORT`: Port to listen on (default: 8080)
//! - `RSVP_SHEET_SECRET`: Shared secret callers must present
//! - `RSVP_SHEET_WEBAPP_URL`: Spreadsheet web app that receives forwarded calls

/// Relay settings, injected into the router at startup.
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    /// Port to listen on
    pub port: u16,
    /// Secret every request must carry; `None` rejects all requests
    pub secret: Option<String>,
    /// Where authorized requests are forwarded
    pub backend_url: Option<String>,
}

impl RelayConfig {
    pub fn new(secret: impl Into<String>, backend_url: impl Into<String>) -> Self {
        Self {
            port: 8080,
            secret: Some(secret.into()),
            backend_url: Some(backend_url.into()),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = std::env::var("RSVP_RELAY_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            port,
            secret: non_empty_var("RSVP_SHEET_SECRET"),
            backend_url: non_empty_var("RSVP_SHEET_WEBAPP_URL"),
        }
    }

    /// Checks a caller-supplied secret.
    pub fn authorizes(&self, given: Option<&str>) -> bool {
        match (given, self.secret.as_deref()) {
            (Some(given), Some(expected)) => !given.is_empty() && given == expected,
            _ => false,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
