//! Folds backend events into the view model the UI renders from.

use client_core::ConsoleState;
use shared::domain::{DraftField, FormDraft};

use crate::controller::events::{UiError, UiEvent};

#[derive(Debug, Default)]
pub struct ConsoleView {
    /// Last snapshot received from the controller.
    pub state: ConsoleState,
    /// Editable copy bound to the form inputs.
    pub draft: FormDraft,
    pub(crate) synced_generation: u64,
    pub status: String,
    pub backend_error: Option<UiError>,
}

impl ConsoleView {
    pub fn busy(&self) -> bool {
        self.state.loading || self.backend_blocked()
    }

    pub fn backend_blocked(&self) -> bool {
        self.backend_error
            .as_ref()
            .is_some_and(UiError::blocks_backend)
    }

    pub fn field_error(&self, field: DraftField) -> Option<&str> {
        self.state.field_errors.get(field)
    }
}

pub fn apply_event(view: &mut ConsoleView, event: UiEvent) {
    match event {
        UiEvent::StateChanged(state) => {
            // Only take the controller's draft when it replaced it; otherwise keep
            // whatever the user typed while a request was in flight.
            if state.draft_generation != view.synced_generation {
                view.draft = state.draft.clone();
                view.synced_generation = state.draft_generation;
            }
            view.state = *state;
        }
        UiEvent::Info(message) => {
            view.status = message;
        }
        UiEvent::Error(err) => {
            tracing::error!(context = ?err.context(), "{}", err.message());
            view.status = err.message().to_string();
            view.backend_error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::UiErrorContext;
    use client_core::ConsoleFailure;
    use shared::domain::{UserId, UserRecord};

    fn record() -> UserRecord {
        UserRecord {
            id: UserId(2),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.com".into(),
            password: "cobol1959".into(),
            birthday: "1906-12-09".into(),
            img_url: None,
        }
    }

    fn snapshot(edit: impl FnOnce(&mut ConsoleState)) -> UiEvent {
        let mut state = ConsoleState::default();
        edit(&mut state);
        UiEvent::StateChanged(Box::new(state))
    }

    #[test]
    fn new_draft_generation_replaces_local_draft() {
        let mut view = ConsoleView::default();
        view.draft.first_name = "typed".into();

        apply_event(
            &mut view,
            snapshot(|state| {
                state.editing = Some(record());
                state.draft = FormDraft::from(&record());
                state.draft_generation = 1;
            }),
        );

        assert_eq!(view.draft.first_name, "Grace");
        assert_eq!(view.state.form_title(), "Edit User");
    }

    #[test]
    fn same_generation_keeps_user_input() {
        let mut view = ConsoleView::default();
        view.draft.first_name = "typing in progress".into();

        apply_event(
            &mut view,
            snapshot(|state| {
                state.loading = true;
            }),
        );

        assert_eq!(view.draft.first_name, "typing in progress");
        assert!(view.busy());
    }

    #[test]
    fn field_errors_and_banner_come_from_snapshot() {
        let mut view = ConsoleView::default();
        apply_event(
            &mut view,
            snapshot(|state| {
                state.field_errors.insert(DraftField::Email, "Invalid email address");
                state.error = Some(ConsoleFailure::SaveUser);
            }),
        );

        assert_eq!(
            view.field_error(DraftField::Email),
            Some("Invalid email address")
        );
        assert_eq!(view.field_error(DraftField::Password), None);
        assert_eq!(view.state.error_message(), Some("Error saving user"));
    }

    #[test]
    fn startup_errors_block_the_form() {
        let mut view = ConsoleView::default();
        apply_event(
            &mut view,
            UiEvent::Error(UiError::new(
                UiErrorContext::Configuration,
                "cannot use API root 'nope'",
            )),
        );

        assert!(view.backend_blocked());
        assert!(view.busy());
        assert_eq!(view.status, "cannot use API root 'nope'");
    }

    #[test]
    fn info_updates_status_line() {
        let mut view = ConsoleView::default();
        apply_event(&mut view, UiEvent::Info("Backend worker ready".into()));
        assert_eq!(view.status, "Backend worker ready");
        assert!(!view.busy());
    }
}
