//! RSVP Relay
//!
//! Authenticated pass-through that forwards guest submissions to the
//! spreadsheet web app, so the web app's secret never ships to browsers.
//!
//! # Configuration
//!
//! Environment variables:
//! - `RSVP_RELAY_PORT`: Port to listen on (default: 8080)
//! - `RSVP_SHEET_SECRET`: Shared secret callers must send
//! - `RSVP_SHEET_WEBAPP_URL`: Spreadsheet web app URL
//!
//! # Endpoints
//!
//! - `GET /health`: Health check endpoint
//! - `POST /submit`: `{secret, action?, data?, id?}`, forwarded when the secret matches

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wedding_rsvp::server::{router, RelayConfig, RelayState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rsvp_relay=info,wedding_rsvp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RelayConfig::from_env();

    if config.secret.is_none() {
        tracing::warn!("RSVP_SHEET_SECRET not set - all submissions will be rejected");
    }
    match &config.backend_url {
        Some(url) => tracing::info!("Forwarding to {}", url),
        None => tracing::warn!("RSVP_SHEET_WEBAPP_URL not set - forwarding will fail"),
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(RelayState::new(config));

    tracing::info!("Starting relay on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
