//! Server-side modules for the RSVP relay.

pub mod config;
pub mod relay;

pub use config::RelayConfig;
pub use relay::{router, RelayState};
