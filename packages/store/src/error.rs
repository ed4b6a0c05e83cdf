use thiserror::Error;

use crate::models::UserId;

/// Failures that can end a directory operation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SyncError {
    /// The draft is incomplete; nothing was sent.
    #[error("missing fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    /// Network failure, malformed response, or an unclassified non-2xx status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The targeted record no longer exists on the server.
    #[error("user {0} not found")]
    NotFound(UserId),
}

impl SyncError {
    pub fn transport(err: impl ToString) -> Self {
        Self::Transport(err.to_string())
    }

    /// Text shown to the user in place of the technical description.
    pub fn user_message(&self, operation: Operation) -> String {
        match self {
            Self::Validation { .. } => "Fill in all fields".to_string(),
            Self::NotFound(_) => "The user no longer exists".to_string(),
            Self::Transport(_) => operation.failure_message().to_string(),
        }
    }
}

/// The four remote operations, used for messages and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Could not load users",
            Self::Create => "Could not create the user",
            Self::Update => "Could not update the user",
            Self::Delete => "Could not delete the user",
        }
    }
}
