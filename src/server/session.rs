//! Session Management
//!
//! Cookie-bound server-side session records. The record travels into
//! handlers as an explicit [`Session`] extractor — request-scoped context,
//! not ambient global state. Sessions live in memory; restarting the server
//! logs everyone out, which is acceptable for a daily puzzle.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{PoisonError, RwLock};

use axum::extract::FromRequestParts;
use axum::http::header::{HeaderMap, HeaderName, COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::response::AppendHeaders;
use uuid::Uuid;

use crate::server::AppState;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "dailyread_session";

/// What a session remembers between requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionData {
    /// Logged-in user, if any.
    pub user_id: Option<i64>,
    /// Admin flag granted at login.
    pub is_admin: bool,
    /// Admin-set play-name override for `/api/play/today`.
    pub override_play: Option<String>,
}

/// In-memory session records keyed by cookie token.
#[derive(Debug, Default)]
pub struct SessionMap {
    inner: RwLock<HashMap<String, SessionData>>,
}

impl SessionMap {
    /// Empty session map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint an unguessable session token.
    pub fn new_token() -> String {
        Uuid::new_v4().to_string()
    }

    /// Snapshot the record for a token.
    pub fn get(&self, token: &str) -> Option<SessionData> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
    }

    /// Create or replace the record for a token.
    pub fn insert(&self, token: String, data: SessionData) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token, data);
    }

    /// Drop the record for a token.
    pub fn remove(&self, token: &str) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

/// Request-scoped session context.
///
/// Resolves the cookie against the session map; an unknown or absent cookie
/// yields a fresh token with default data. Nothing is stored until a handler
/// calls [`SessionMap::insert`].
#[derive(Clone, Debug)]
pub struct Session {
    /// Cookie token identifying this session.
    pub token: String,
    /// Snapshot of the session record at extraction time.
    pub data: SessionData,
}

impl Session {
    /// Set-Cookie header binding this session's token.
    pub fn cookie(&self) -> AppendHeaders<[(HeaderName, String); 1]> {
        AppendHeaders([(
            SET_COOKIE,
            format!(
                "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
                self.token
            ),
        )])
    }

    /// Set-Cookie header expiring the session cookie.
    pub fn clear_cookie() -> AppendHeaders<[(HeaderName, String); 1]> {
        AppendHeaders([(
            SET_COOKIE,
            format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"),
        )])
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(token) = cookie_token(&parts.headers) {
            if let Some(data) = state.sessions.get(&token) {
                return Ok(Self { token, data });
            }
        }
        Ok(Self {
            token: SessionMap::new_token(),
            data: SessionData::default(),
        })
    }
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}
