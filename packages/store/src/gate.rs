//! Confirmation gate: suspends an intent until the user approves, edits, or
//! dismisses it.
//!
//! The controller receives a [`ConfirmationGate`] at construction; nothing looks
//! a dialog implementation up globally. The `ui` crate provides the dialog
//! backed version, tests use scripted ones.

use crate::models::{DraftForm, UserId, UserRecord};

/// What the gate is asked to show.
#[derive(Clone, Debug, PartialEq)]
pub enum Prompt {
    /// Warning that can only be acknowledged. Never yields a payload.
    Notice { message: String },
    /// Edit dialog prefilled from `record`.
    EditRecord { record: UserRecord },
    /// Yes/no question before an irreversible delete.
    ConfirmDelete { id: UserId, message: String },
}

impl Prompt {
    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice {
            message: message.into(),
        }
    }

    pub fn confirm_delete(id: UserId) -> Self {
        Self::ConfirmDelete {
            id,
            message: "Delete this user? This cannot be undone.".to_string(),
        }
    }

    /// Initial field values for the dialog, if it has any.
    pub fn prefill(&self) -> Option<DraftForm> {
        match self {
            Self::EditRecord { record } => Some(DraftForm::from(record)),
            _ => None,
        }
    }
}

/// How the user answered a [`Prompt`].
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Cancelled,
    Edited(DraftForm),
    Approved,
}

impl Resolution {
    pub fn approves(&self) -> bool {
        matches!(self, Self::Approved)
    }

    pub fn into_draft(self) -> Option<DraftForm> {
        match self {
            Self::Edited(draft) => Some(draft),
            _ => None,
        }
    }
}

/// Async interaction point between an intent and its execution.
pub trait ConfirmationGate {
    fn present(&self, prompt: Prompt) -> impl std::future::Future<Output = Resolution>;
}
