//! Shared UI for the user directory.
//!
//! [`DirectoryProvider`] owns the [`store::SyncController`] and mirrors its state
//! into signals; the components below only read those signals and raise intents.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod gate;
pub use gate::{DialogGate, PendingPrompt};

mod directory;
pub use directory::{use_directory, Directory, DirectoryProvider};

mod user_form;
pub use user_form::UserForm;

mod user_list;
pub use user_list::UserList;

mod gate_dialog;
pub use gate_dialog::GateDialog;

pub mod views;
