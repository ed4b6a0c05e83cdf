pub mod error;
pub mod gate;
pub mod gateway;
pub mod models;
pub mod sync;

mod memory;
pub use memory::MemoryGateway;

pub use error::{Operation, SyncError};
pub use gate::{ConfirmationGate, Prompt, Resolution};
pub use gateway::UserGateway;
pub use models::{DraftForm, UserId, UserRecord};
pub use sync::{IntentOutcome, SyncController, SyncState, SyncStatus};
