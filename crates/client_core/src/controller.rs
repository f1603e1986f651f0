//! Form/list controller for the users collection.
//!
//! All console state lives in one [`ConsoleState`] owned by [`UserFormController`] and
//! is only changed through the controller's operations. Every mutation is pushed to the
//! optional [`StateObserver`], so a UI running on another thread can follow along,
//! including the loading flag while a request is still outstanding.

use std::{fmt, sync::Arc};

use shared::{
    domain::{FormDraft, UserId, UserRecord},
    error::FieldErrors,
    validation::validate,
};
use tracing::{debug, error, info};

use crate::{directory::UserDirectory, error::TransportError};

pub const LOAD_USERS_FAILED: &str = "Error loading users";
pub const SAVE_USER_FAILED: &str = "Error saving user";
pub const DELETE_USER_FAILED: &str = "Error deleting user";

/// The user-facing failure shown in the banner. Transport details only go to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFailure {
    LoadUsers,
    SaveUser,
    DeleteUser,
}

impl ConsoleFailure {
    pub fn message(self) -> &'static str {
        match self {
            ConsoleFailure::LoadUsers => LOAD_USERS_FAILED,
            ConsoleFailure::SaveUser => SAVE_USER_FAILED,
            ConsoleFailure::DeleteUser => DELETE_USER_FAILED,
        }
    }
}

impl fmt::Display for ConsoleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsoleState {
    /// Result of the last successful fetch, never patched locally.
    pub users: Vec<UserRecord>,
    /// `None` means the form creates a new user.
    pub editing: Option<UserRecord>,
    pub loading: bool,
    pub error: Option<ConsoleFailure>,
    pub draft: FormDraft,
    pub field_errors: FieldErrors,
    /// Bumped whenever the controller replaces the draft itself.
    pub draft_generation: u64,
}

impl ConsoleState {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(ConsoleFailure::message)
    }

    pub fn form_title(&self) -> &'static str {
        if self.is_editing() {
            "Edit User"
        } else {
            "Create User"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Saving..."
        } else if self.is_editing() {
            "Update"
        } else {
            "Create"
        }
    }

    pub fn show_empty_placeholder(&self) -> bool {
        self.users.is_empty() && !self.loading
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected before any request was made.
    Invalid(FieldErrors),
    /// Carries the stored record when the server echoed it back.
    Saved(Option<UserRecord>),
    Failed,
}

pub trait StateObserver: Send + Sync {
    fn state_changed(&self, state: &ConsoleState);
}

impl<F> StateObserver for F
where
    F: Fn(&ConsoleState) + Send + Sync,
{
    fn state_changed(&self, state: &ConsoleState) {
        self(state)
    }
}

pub struct UserFormController {
    directory: Arc<dyn UserDirectory>,
    state: ConsoleState,
    observer: Option<Box<dyn StateObserver>>,
}

impl UserFormController {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            directory,
            state: ConsoleState::default(),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: impl StateObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    /// Replaces the cached list with the server's. On failure the old list stays.
    pub async fn list(&mut self) -> bool {
        self.begin_request();
        let loaded = match self.directory.list_users().await {
            Ok(users) => {
                debug!(count = users.len(), "loaded users");
                self.state.users = users;
                true
            }
            Err(err) => {
                error!(error = %err, status = ?err.status(), "failed to load users");
                self.state.error = Some(ConsoleFailure::LoadUsers);
                false
            }
        };
        self.finish_request();
        loaded
    }

    pub async fn create(&self, draft: &FormDraft) -> Result<Option<UserRecord>, TransportError> {
        debug!(email = %draft.email, "creating user");
        self.directory.create_user(draft).await
    }

    pub async fn update(
        &self,
        id: UserId,
        draft: &FormDraft,
    ) -> Result<Option<UserRecord>, TransportError> {
        debug!(user_id = %id, "updating user");
        self.directory.update_user(id, draft).await
    }

    /// Validates, then creates or updates depending on the editing target, then refreshes.
    ///
    /// The draft is kept on failure so the user can retry.
    pub async fn submit(&mut self, draft: FormDraft) -> SubmitOutcome {
        let errors = validate(&draft);
        self.state.draft = draft;
        if !errors.is_empty() {
            debug!(fields = %errors, "draft rejected by validation");
            self.state.field_errors = errors.clone();
            self.publish();
            return SubmitOutcome::Invalid(errors);
        }

        self.state.field_errors.clear();
        self.begin_request();

        let draft = self.state.draft.clone();
        let target = self.state.editing.as_ref().map(|record| record.id);
        let saved = match target {
            Some(id) => {
                let updated = self.update(id, &draft).await;
                if updated.is_ok() {
                    self.state.editing = None;
                }
                updated
            }
            None => self.create(&draft).await,
        };

        let outcome = match saved {
            Ok(record) => {
                match &record {
                    Some(saved) => info!(user_id = %saved.id, "saved user"),
                    None => info!(target_id = ?target, "saved user; server sent no record back"),
                }
                self.reset_draft();
                self.list().await;
                SubmitOutcome::Saved(record)
            }
            Err(err) => {
                error!(error = %err, status = ?err.status(), "failed to save user");
                self.state.error = Some(ConsoleFailure::SaveUser);
                SubmitOutcome::Failed
            }
        };
        self.finish_request();
        outcome
    }

    /// Deletes one user and refreshes. No refresh happens when the delete fails.
    pub async fn delete(&mut self, id: UserId) -> bool {
        self.begin_request();
        let deleted = match self.directory.delete_user(id).await {
            Ok(()) => {
                info!(user_id = %id, "deleted user");
                self.list().await;
                true
            }
            Err(err) => {
                error!(
                    error = %err,
                    status = ?err.status(),
                    user_id = %id,
                    "failed to delete user"
                );
                self.state.error = Some(ConsoleFailure::DeleteUser);
                false
            }
        };
        self.finish_request();
        deleted
    }

    pub fn begin_edit(&mut self, record: &UserRecord) {
        debug!(user_id = %record.id, "editing user");
        self.state.editing = Some(record.clone());
        self.state.draft = FormDraft::from(record);
        self.state.draft_generation += 1;
        self.state.field_errors.clear();
        self.publish();
    }

    pub fn cancel_edit(&mut self) {
        self.state.editing = None;
        self.state.field_errors.clear();
        self.reset_draft();
        self.publish();
    }

    /// Records user input without validating it.
    pub fn set_draft(&mut self, draft: FormDraft) {
        self.state.draft = draft;
        self.publish();
    }

    pub fn dismiss_error(&mut self) {
        if self.state.error.take().is_some() {
            self.publish();
        }
    }

    fn reset_draft(&mut self) {
        self.state.draft = FormDraft::default();
        self.state.draft_generation += 1;
    }

    fn begin_request(&mut self) {
        self.state.loading = true;
        self.state.error = None;
        self.publish();
    }

    fn finish_request(&mut self) {
        self.state.loading = false;
        self.publish();
    }

    fn publish(&self) {
        if let Some(observer) = &self.observer {
            observer.state_changed(&self.state);
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
