//! The guest list as one device sees it.
//!
//! [`RsvpBook`] owns the in-memory entry list, mirrors every change into the
//! [`EntryCache`], and drives each submission through its [`Submission`]
//! state machine. `submit` borrows the book mutably across the network call,
//! so one book never has two submissions in flight.

use chrono::Utc;
use thiserror::Error;

use crate::models::{Entry, RsvpForm};
use crate::notice::{Notice, NoticeKind};
use crate::store::{EntryCache, KeyValueStore, StoreError};
use crate::summary::Summary;
use crate::sync::{SubmitOutcome, SyncError, SyncGateway};
use crate::validation::{validate_submission, ValidationError};

#[derive(Debug, Error)]
pub enum BookError {
    #[error("{0}")]
    Rejected(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("No entry at position {0}")]
    NoSuchEntry(usize),
    #[error("Submission cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Where a single submission attempt stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Rejected(ValidationError),
    Sending,
    CommittedRemote,
    CommittedLocalFallback(SyncError),
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Rejected(_)
                | SubmissionState::CommittedRemote
                | SubmissionState::CommittedLocalFallback(_)
        )
    }

    fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Rejected(_) => "rejected",
            SubmissionState::Sending => "sending",
            SubmissionState::CommittedRemote => "committed remotely",
            SubmissionState::CommittedLocalFallback(_) => "committed locally",
        }
    }
}

/// One submission attempt.
///
/// `Idle -> Validating -> Rejected | Sending -> CommittedRemote |
/// CommittedLocalFallback`. Terminal states accept no further transitions;
/// retrying means starting a new `Submission`.
#[derive(Debug)]
pub struct Submission {
    state: SubmissionState,
}

impl Default for Submission {
    fn default() -> Self {
        Self::new()
    }
}

impl Submission {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Validates the form, moving to `Sending` on success or `Rejected`.
    pub fn validate(&mut self, form: &RsvpForm) -> Result<Entry, BookError> {
        self.expect(SubmissionState::Idle, "validate")?;
        self.enter(SubmissionState::Validating);

        match validate_submission(form, Utc::now()) {
            Ok(entry) => {
                self.enter(SubmissionState::Sending);
                Ok(entry)
            }
            Err(e) => {
                self.enter(SubmissionState::Rejected(e.clone()));
                Err(e.into())
            }
        }
    }

    /// Records how the remote call ended.
    pub fn finish(&mut self, outcome: &SubmitOutcome) -> Result<(), BookError> {
        self.expect(SubmissionState::Sending, "finish")?;
        let next = match outcome {
            SubmitOutcome::Remote => SubmissionState::CommittedRemote,
            SubmitOutcome::LocalFallback(e) => SubmissionState::CommittedLocalFallback(e.clone()),
        };
        self.enter(next);
        Ok(())
    }

    fn expect(&self, state: SubmissionState, action: &'static str) -> Result<(), BookError> {
        if self.state == state {
            Ok(())
        } else {
            Err(BookError::InvalidTransition {
                action,
                state: self.state.name(),
            })
        }
    }

    fn enter(&mut self, next: SubmissionState) {
        tracing::debug!("Submission {} -> {}", self.state.name(), next.name());
        self.state = next;
    }
}

/// Unauthorized and transport failures read the same to a guest.
fn fallback_banner(reason: &SyncError) -> Notice {
    let message = match reason {
        SyncError::NotConfigured => "No server link configured; saved on this device only",
        _ => "Submission failed: could not write to the server, saved on this device",
    };
    Notice::banner(NoticeKind::Warning, message)
}

/// What a completed submission produced.
#[derive(Debug, Clone)]
pub struct SubmitReport {
    pub entry: Entry,
    pub outcome: SubmitOutcome,
    /// Final state of the attempt
    pub state: SubmissionState,
    /// True when an existing position was overwritten by an edit
    pub replaced: bool,
    pub notice: Notice,
    /// Banner explaining a local-only save
    pub warning: Option<Notice>,
}

/// The entry list plus its persistence, edit and undo state.
pub struct RsvpBook<S> {
    cache: EntryCache<S>,
    entries: Vec<Entry>,
    last_deleted: Option<Entry>,
    pending_delete: Option<usize>,
    editing: Option<usize>,
}

impl<S: KeyValueStore> RsvpBook<S> {
    /// Loads the list and undo slot from the store.
    pub fn open(store: S) -> Self {
        let cache = EntryCache::new(store);
        let entries = cache.load();
        let last_deleted = cache.load_undo();

        Self {
            cache,
            entries,
            last_deleted,
            pending_delete: None,
            editing: None,
        }
    }

    pub fn cache(&self) -> &EntryCache<S> {
        &self.cache
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> Summary {
        Summary::from_entries(&self.entries)
    }

    pub fn last_deleted(&self) -> Option<&Entry> {
        self.last_deleted.as_ref()
    }

    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    /// Marks a position for editing and returns its form.
    ///
    /// The next submission overwrites this position instead of adding a new
    /// entry.
    pub fn begin_edit(&mut self, index: usize) -> Result<RsvpForm, BookError> {
        let entry = self
            .entries
            .get(index)
            .ok_or(BookError::NoSuchEntry(index))?;
        let form = RsvpForm::from_entry(entry);
        self.editing = Some(index);
        Ok(form)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Validates, sends and commits one submission.
    ///
    /// A rejected form touches neither the list nor the network. Otherwise
    /// the entry is committed once the remote call resolves, whatever its
    /// outcome.
    pub async fn submit(
        &mut self,
        form: &RsvpForm,
        gateway: &SyncGateway,
    ) -> Result<SubmitReport, BookError> {
        let mut submission = Submission::new();
        let mut entry = submission.validate(form)?;

        if let Some(original) = self.editing.and_then(|i| self.entries.get(i)) {
            entry.id = original.id;
            entry.created_at = original.created_at;
        }

        let outcome = gateway.submit(&entry).await;
        submission.finish(&outcome)?;

        let (notice, warning) = match &outcome {
            SubmitOutcome::Remote => (
                Notice::success("Thank you! Your response has been received."),
                None,
            ),
            SubmitOutcome::LocalFallback(reason) => {
                if reason.is_unauthorized() {
                    tracing::warn!("Remote refused the shared secret, keeping entry locally");
                } else {
                    tracing::warn!("Remote submit failed, keeping entry locally: {}", reason);
                }
                (
                    Notice::success("Your response has been received (saved on this device only)."),
                    Some(fallback_banner(reason)),
                )
            }
        };

        let replaced = self.commit(entry.clone())?;

        Ok(SubmitReport {
            entry,
            outcome,
            state: submission.state().clone(),
            replaced,
            notice,
            warning,
        })
    }

    /// Puts an entry in the list, at the edited position if any, else at the head.
    fn commit(&mut self, entry: Entry) -> Result<bool, StoreError> {
        let replaced = match self.editing.take() {
            Some(index) if index < self.entries.len() => {
                self.entries[index] = entry;
                true
            }
            _ => {
                self.entries.insert(0, entry);
                false
            }
        };
        self.cache.save(&self.entries)?;
        Ok(replaced)
    }

    /// First phase of a delete: remembers the position awaiting confirmation.
    pub fn request_delete(&mut self, index: usize) -> Result<&Entry, BookError> {
        let entry = self
            .entries
            .get(index)
            .ok_or(BookError::NoSuchEntry(index))?;
        self.pending_delete = Some(index);
        Ok(entry)
    }

    pub fn pending_delete(&self) -> Option<&Entry> {
        self.pending_delete.and_then(|i| self.entries.get(i))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second phase of a delete.
    ///
    /// The removed entry replaces whatever was in the undo slot. Returns
    /// `None` when no delete was requested.
    pub fn confirm_delete(&mut self) -> Result<Option<Entry>, BookError> {
        let Some(index) = self.pending_delete.take() else {
            return Ok(None);
        };
        if index >= self.entries.len() {
            return Err(BookError::NoSuchEntry(index));
        }

        let removed = self.entries.remove(index);
        self.editing = None;
        self.cache.save(&self.entries)?;
        self.cache.save_undo(Some(&removed))?;
        self.last_deleted = Some(removed.clone());

        tracing::info!("Deleted entry {} ({})", removed.id, removed.name);
        Ok(Some(removed))
    }

    /// Puts the last deleted entry back at the head of the list.
    pub fn undo_delete(&mut self) -> Result<Option<Entry>, BookError> {
        let Some(entry) = self.last_deleted.take() else {
            return Ok(None);
        };

        self.entries.insert(0, entry.clone());
        self.editing = None;
        self.pending_delete = None;
        self.cache.save(&self.entries)?;
        self.cache.save_undo(None)?;

        Ok(Some(entry))
    }
}
