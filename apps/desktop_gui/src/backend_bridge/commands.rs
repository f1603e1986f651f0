//! Backend commands queued from UI to backend worker.

use shared::domain::{FormDraft, UserId, UserRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    Refresh,
    Submit { draft: FormDraft },
    Delete { id: UserId },
    BeginEdit { record: UserRecord },
    CancelEdit,
    DismissError,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Refresh => "refresh",
            BackendCommand::Submit { .. } => "submit",
            BackendCommand::Delete { .. } => "delete",
            BackendCommand::BeginEdit { .. } => "begin_edit",
            BackendCommand::CancelEdit => "cancel_edit",
            BackendCommand::DismissError => "dismiss_error",
        }
    }
}
