//! Remote delivery of RSVP entries.
//!
//! Entries are posted as JSON either to the relay or straight to the
//! spreadsheet backend. Delivery is best effort: a failed post never loses the
//! entry, it is committed to the local cache instead.
//!
//! # Usage
//!
//! ```no_run
//! use wedding_rsvp::sync::{SubmitMode, SyncGateway};
//!
//! let gateway = SyncGateway::new(
//!     SubmitMode::Relay,
//!     Some("http://localhost:8080/submit".to_string()),
//!     "shared-secret",
//! );
//! assert!(gateway.is_configured());
//! ```

pub mod error;
pub mod gateway;
pub mod protocol;

pub use error::SyncError;
pub use gateway::{SubmitMode, SubmitOutcome, SyncGateway};
pub use protocol::{Action, RemoteReply, RemoteRequest};
