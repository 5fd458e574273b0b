//! Stored Record Types
//!
//! Rows as the rest of the system sees them. Attempts are immutable once
//! created; the JSON columns (route selections, events) round-trip verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A registered user.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    /// Row id.
    pub id: i64,
    /// Login email, unique.
    pub email: String,
    /// Password hash; absent for externally authenticated accounts.
    pub password_hash: Option<String>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
}

/// One stored submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    /// Row id.
    pub id: i64,
    /// Owning user; `None` for anonymous submissions.
    pub user_id: Option<i64>,
    /// Name of the play the attempt ran against.
    pub play_name: String,
    /// Date key the play was served for.
    pub play_date: String,
    /// Client route-selection mapping, stored verbatim.
    pub route_selections: Value,
    /// Full submitted event trace, stored verbatim.
    pub events: Value,
    /// Computed score.
    pub score: f64,
    /// The coverage answer at scoring time.
    pub coverage: String,
    /// Client idempotency token, if supplied.
    pub client_id: Option<String>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
}

/// Input for creating an attempt; id and timestamp are assigned by the store.
#[derive(Clone, Debug)]
pub struct NewAttempt {
    /// Owning user, if logged in.
    pub user_id: Option<i64>,
    /// Play name.
    pub play_name: String,
    /// Play date key.
    pub play_date: String,
    /// Route-selection mapping.
    pub route_selections: Value,
    /// Event trace.
    pub events: Value,
    /// Computed score.
    pub score: f64,
    /// Coverage answer.
    pub coverage: String,
    /// Idempotency token.
    pub client_id: Option<String>,
}

/// Listing filter; all fields optional, combined with AND.
#[derive(Clone, Debug, Default)]
pub struct AttemptFilter {
    /// Only attempts owned by this user.
    pub user_id: Option<i64>,
    /// Only attempts against this play name.
    pub play_name: Option<String>,
}

impl AttemptFilter {
    /// No filtering: every attempt, newest first.
    pub fn all() -> Self {
        Self::default()
    }

    /// Attempts owned by one user.
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }
}
