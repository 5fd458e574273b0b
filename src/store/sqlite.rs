//! SQLite Store
//!
//! Single-file persistence, accessed synchronously behind a mutex. One write
//! per submission, no cross-row consistency requirements; the connection
//! mutex is the only serialization the contract needs.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::store::types::{Attempt, AttemptFilter, NewAttempt, User};
use crate::store::{Store, StoreError};

/// SQLite-backed [`Store`].
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

/// Raw attempt columns before the JSON/timestamp fields are parsed.
struct AttemptRow {
    id: i64,
    user_id: Option<i64>,
    play_name: String,
    play_date: String,
    route_selections: String,
    events: String,
    score: f64,
    coverage: String,
    client_id: Option<String>,
    created_at: String,
}

impl AttemptRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            play_name: row.get("play_name")?,
            play_date: row.get("play_date")?,
            route_selections: row.get("route_selections")?,
            events: row.get("events")?,
            score: row.get("score")?,
            coverage: row.get("coverage")?,
            client_id: row.get("client_id")?,
            created_at: row.get("created_at")?,
        })
    }

    fn into_attempt(self) -> Result<Attempt, StoreError> {
        Ok(Attempt {
            id: self.id,
            user_id: self.user_id,
            play_name: self.play_name,
            play_date: self.play_date,
            route_selections: serde_json::from_str(&self.route_selections)?,
            events: serde_json::from_str(&self.events)?,
            score: self.score,
            coverage: self.coverage,
            client_id: self.client_id,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

/// Fixed-width RFC 3339 so lexicographic and chronological order agree.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<(i64, String, Option<String>, String)> {
    Ok((
        row.get("id")?,
        row.get("email")?,
        row.get("password_hash")?,
        row.get("created_at")?,
    ))
}

const SELECT_ATTEMPT: &str = "SELECT id, user_id, play_name, play_date, route_selections, \
     events, score, coverage, client_id, created_at FROM attempts";

impl SqliteStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database (tests).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS attempts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER,
                play_name TEXT NOT NULL,
                play_date TEXT NOT NULL,
                route_selections TEXT NOT NULL,
                events TEXT NOT NULL,
                score REAL NOT NULL,
                coverage TEXT NOT NULL,
                client_id TEXT UNIQUE,
                created_at TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A poisoned lock just means another thread panicked mid-query;
        // the connection itself is still usable.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn attempt_by_client_id(
        conn: &Connection,
        client_id: &str,
    ) -> Result<Option<Attempt>, StoreError> {
        let row = conn
            .query_row(
                &format!("{SELECT_ATTEMPT} WHERE client_id = ?1"),
                params![client_id],
                AttemptRow::from_row,
            )
            .optional()?;
        row.map(AttemptRow::into_attempt).transpose()
    }
}

impl Store for SqliteStore {
    fn create_attempt(&self, attempt: NewAttempt) -> Result<Attempt, StoreError> {
        let conn = self.conn();

        // Idempotency: a replayed client token returns the original row
        // unchanged instead of inserting a duplicate.
        if let Some(client_id) = attempt.client_id.as_deref() {
            if let Some(existing) = Self::attempt_by_client_id(&conn, client_id)? {
                return Ok(existing);
            }
        }

        let created_at = Utc::now();
        let route_selections = serde_json::to_string(&attempt.route_selections)?;
        let events = serde_json::to_string(&attempt.events)?;
        conn.execute(
            "INSERT INTO attempts (user_id, play_name, play_date, route_selections, \
             events, score, coverage, client_id, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                attempt.user_id,
                attempt.play_name,
                attempt.play_date,
                route_selections,
                events,
                attempt.score,
                attempt.coverage,
                attempt.client_id,
                format_timestamp(created_at),
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Attempt {
            id,
            user_id: attempt.user_id,
            play_name: attempt.play_name,
            play_date: attempt.play_date,
            route_selections: attempt.route_selections,
            events: attempt.events,
            score: attempt.score,
            coverage: attempt.coverage,
            client_id: attempt.client_id,
            created_at: parse_timestamp(&format_timestamp(created_at))?,
        })
    }

    fn list_attempts(&self, filter: &AttemptFilter) -> Result<Vec<Attempt>, StoreError> {
        let conn = self.conn();

        let mut sql = SELECT_ATTEMPT.to_string();
        let mut clauses = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(user_id) = filter.user_id {
            values.push(Box::new(user_id));
            clauses.push(format!("user_id = ?{}", values.len()));
        }
        if let Some(play_name) = &filter.play_name {
            values.push(Box::new(play_name.clone()));
            clauses.push(format!("play_name = ?{}", values.len()));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(values.iter().map(|v| v.as_ref())),
            AttemptRow::from_row,
        )?;

        let mut attempts = Vec::new();
        for row in rows {
            attempts.push(row?.into_attempt()?);
        }
        Ok(attempts)
    }

    fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let conn = self.conn();
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![email, password_hash, format_timestamp(created_at)],
        )?;
        Ok(User {
            id: conn.last_insert_rowid(),
            email: email.to_string(),
            password_hash: Some(password_hash.to_string()),
            created_at: parse_timestamp(&format_timestamp(created_at))?,
        })
    }

    fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let conn = self.conn();
        let row = conn
            .query_row(
                "SELECT id, email, password_hash, created_at FROM users WHERE email = ?1",
                params![email],
                user_from_row,
            )
            .optional()?;
        row.map(|(id, email, password_hash, created_at)| {
            Ok(User {
                id,
                email,
                password_hash,
                created_at: parse_timestamp(&created_at)?,
            })
        })
        .transpose()
    }

    fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let conn = self.conn();
        let row = conn
            .query_row(
                "SELECT id, email, password_hash, created_at FROM users WHERE id = ?1",
                params![id],
                user_from_row,
            )
            .optional()?;
        row.map(|(id, email, password_hash, created_at)| {
            Ok(User {
                id,
                email,
                password_hash,
                created_at: parse_timestamp(&created_at)?,
            })
        })
        .transpose()
    }
}

// =============================================================================
// TESTS
// =============================================================================
