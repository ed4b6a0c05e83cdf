//! # API crate — remote access to the user collection
//!
//! Everything the directory needs to talk to the REST service that owns the
//! user records. The sync logic itself lives in `store`; this crate only
//! supplies the HTTP implementation of [`store::UserGateway`] and the endpoint
//! it points at.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | [`ApiConfig`]: host, port and path prefix, read once at startup from `API_HOST` / `API_PORT` / `API_BASE` |
//! | [`http`] | [`HttpGateway`]: `reqwest` client for `GET/POST /users` and `PUT/DELETE /users/{id}` with status classification |

pub mod config;
pub mod http;

pub use config::{ApiConfig, ConfigError};
pub use http::HttpGateway;

pub use store::{DraftForm, SyncError, UserId, UserRecord};
