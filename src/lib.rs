//! Wedding RSVP
//!
//! Guest response collection with local-first persistence: responses are
//! validated, posted once to the spreadsheet backend (through the relay or
//! directly), and always kept in the device's cache whether or not the
//! remote write succeeded.

pub mod book;
pub mod config;
pub mod export;
pub mod models;
pub mod notice;
pub mod server;
pub mod store;
pub mod summary;
pub mod sync;
pub mod validation;

pub use book::{BookError, RsvpBook, SubmissionState, SubmitReport};
pub use models::{Attendance, Entry, MealPref, RsvpForm, Side};
pub use store::{EntryCache, FileStore, KeyValueStore, MemoryStore, StoreError};
pub use summary::Summary;
pub use sync::{SubmitMode, SubmitOutcome, SyncError, SyncGateway};
pub use validation::{meal_counts_valid, to_int, ValidationError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
