use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::application::directory_store::DirectoryStore;
use crate::domain::customer::{ApiError, Draft, DraftField, NewCustomer};
use crate::domain::errors::DirectoryError;
use crate::domain::ports::DirectoryApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPhase {
    #[default]
    Closed,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationState {
    pub phase: DialogPhase,
    pub draft: Draft,
    /// Failure of the latest submission, cleared on the next attempt.
    pub error: Option<ApiError>,
}

impl CreationState {
    pub fn is_open(&self) -> bool {
        self.phase != DialogPhase::Closed
    }
}

/// Owns the "Add Customer" dialog and its draft.
///
/// Each opening of the dialog starts a new session. A submission only writes its
/// outcome back if its session is still the current one, so closing the dialog
/// while a create is in flight discards the draft for good.
pub struct CreationFlow<A> {
    api: Arc<A>,
    directory: Arc<DirectoryStore<A>>,
    session: AtomicU64,
    state: watch::Sender<CreationState>,
}

impl<A: DirectoryApi> CreationFlow<A> {
    pub fn new(api: Arc<A>, directory: Arc<DirectoryStore<A>>) -> Self {
        let (state, _) = watch::channel(CreationState::default());
        Self {
            api,
            directory,
            session: AtomicU64::new(0),
            state,
        }
    }

    pub fn open_dialog(&self) {
        self.session.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(CreationState {
            phase: DialogPhase::Editing,
            draft: Draft::default(),
            error: None,
        });
        log::debug!("creation dialog opened");
    }

    pub fn close_dialog(&self) {
        self.session.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(CreationState::default());
        log::debug!("creation dialog closed, draft discarded");
    }

    /// Replaces one field of the draft. Ignored while the dialog is closed.
    pub fn update_field(&self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        self.state.send_if_modified(|state| {
            if !state.is_open() {
                log::debug!("ignoring update of {} while the dialog is closed", field.name());
                return false;
            }
            state.draft = std::mem::take(&mut state.draft).with_field(field, value);
            true
        });
    }

    /// Posts the current draft.
    ///
    /// On success the dialog closes and the directory is revalidated once. On
    /// failure the dialog stays open with the draft intact and the error is both
    /// recorded in the state and returned.
    pub async fn submit(&self) -> Result<(), DirectoryError> {
        let session = self.session.load(Ordering::SeqCst);
        let payload = self.begin_submission()?;
        log::debug!("submitting new customer");

        let mut guard = SubmissionGuard {
            state: &self.state,
            session: &self.session,
            owner: session,
            armed: true,
        };
        let result = self.api.create_customer(&payload).await;
        guard.armed = false;

        match result {
            Ok(()) => {
                if self.is_current(session) {
                    self.session.fetch_add(1, Ordering::SeqCst);
                    self.state.send_replace(CreationState::default());
                }
                log::info!("customer created, revalidating directory");
                self.directory.revalidate().await;
                Ok(())
            }
            Err(e) => {
                log::warn!("customer was not created: {}", e);
                if self.is_current(session) {
                    let error = e.to_api_error();
                    self.state.send_modify(|state| {
                        state.phase = DialogPhase::Editing;
                        state.error = Some(error);
                    });
                }
                Err(e)
            }
        }
    }

    pub fn state(&self) -> CreationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CreationState> {
        self.state.subscribe()
    }

    fn begin_submission(&self) -> Result<NewCustomer, DirectoryError> {
        let mut outcome = Err(DirectoryError::DialogClosed);
        self.state.send_if_modified(|state| match state.phase {
            DialogPhase::Closed => false,
            DialogPhase::Submitting => {
                outcome = Err(DirectoryError::SubmissionPending);
                false
            }
            DialogPhase::Editing => {
                state.phase = DialogPhase::Submitting;
                state.error = None;
                outcome = Ok(state.draft.to_payload());
                true
            }
        });
        outcome
    }

    fn is_current(&self, session: u64) -> bool {
        self.session.load(Ordering::SeqCst) == session
    }
}

/// Returns the dialog to `Editing`, draft untouched, when a submission future
/// is dropped before the create request resolves.
struct SubmissionGuard<'a> {
    state: &'a watch::Sender<CreationState>,
    session: &'a AtomicU64,
    owner: u64,
    armed: bool,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        if !self.armed || self.session.load(Ordering::SeqCst) != self.owner {
            return;
        }
        log::debug!("submission dropped before completion");
        self.state.send_if_modified(|state| {
            if state.phase != DialogPhase::Submitting {
                return false;
            }
            state.phase = DialogPhase::Editing;
            true
        });
    }
}
