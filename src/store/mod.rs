//! Attempt Store
//!
//! Narrow persistence contract for attempts and users. Generation and
//! scoring depend only on this trait, never on the storage technology behind
//! it; the SQLite implementation is the only one shipped.

pub mod sqlite;
pub mod types;

use thiserror::Error;

pub use sqlite::SqliteStore;
pub use types::{Attempt, AttemptFilter, NewAttempt, User};

/// Storage failures. The core does not handle these specially; they
/// propagate to the request layer as generic failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored JSON column failed to parse.
    #[error("corrupt stored json: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored timestamp failed to parse.
    #[error("corrupt stored timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// Persistence contract the request layer programs against.
pub trait Store: Send + Sync {
    /// Persist an attempt, assigning id and timestamp.
    ///
    /// If `client_id` is present and an attempt with the same token already
    /// exists, the original stored attempt is returned unchanged.
    fn create_attempt(&self, attempt: NewAttempt) -> Result<Attempt, StoreError>;

    /// List attempts matching `filter`, newest first.
    fn list_attempts(&self, filter: &AttemptFilter) -> Result<Vec<Attempt>, StoreError>;

    /// Create a user. Fails on duplicate email.
    fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Look up a user by email.
    fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by id.
    fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
}
