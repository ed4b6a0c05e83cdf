//! # Remote gateway — the four REST operations against one collection
//!
//! [`UserGateway`] is the boundary between the directory and whatever holds the
//! records. Each call is a plain request/response: it never touches
//! [`crate::SyncState`] and never retries. Implementations live in
//! [`crate::memory`] (in-process collection) and in the `api` crate (HTTP).
//!
//! | Method | Fails with |
//! |--------|-----------|
//! | [`list`](UserGateway::list) | `Transport` |
//! | [`create`](UserGateway::create) | `Transport` |
//! | [`update`](UserGateway::update) | `NotFound`, `Transport` |
//! | [`delete`](UserGateway::delete) | `NotFound`, `Transport` |
//!
//! An empty collection is a successful `list`, distinct from a failure.

use crate::error::SyncError;
use crate::models::{DraftForm, UserId, UserRecord};

/// Async access to the remote user collection.
pub trait UserGateway {
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<UserRecord>, SyncError>>;
    fn create(
        &self,
        draft: &DraftForm,
    ) -> impl std::future::Future<Output = Result<UserRecord, SyncError>>;
    fn update(
        &self,
        id: &UserId,
        draft: &DraftForm,
    ) -> impl std::future::Future<Output = Result<UserRecord, SyncError>>;
    fn delete(&self, id: &UserId) -> impl std::future::Future<Output = Result<(), SyncError>>;
}
