//! HTTP Layer
//!
//! The non-deterministic edge of the system: routing, sessions, auth glue,
//! and error shaping. Everything here is thin — the deterministic core never
//! sees a request.

pub mod config;
pub mod error;
pub mod handlers;
pub mod password;
pub mod session;

use std::sync::Arc;

use crate::server::config::ServerConfig;
use crate::server::session::SessionMap;
use crate::store::Store;

pub use error::{ApiError, ApiResult};
pub use handlers::create_router;

/// Shared state behind every handler.
#[derive(Clone)]
pub struct AppState {
    /// Attempt and user persistence.
    pub store: Arc<dyn Store>,
    /// In-memory session records.
    pub sessions: Arc<SessionMap>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Assemble application state.
    pub fn new(store: Arc<dyn Store>, config: ServerConfig) -> Self {
        Self {
            store,
            sessions: Arc::new(SessionMap::new()),
            config: Arc::new(config),
        }
    }
}
