//! HTTP Handlers
//!
//! Thin request glue over the deterministic core: resolve the seed, run the
//! generator or the scorer, talk to the store, shape the JSON. Bodies are
//! parsed leniently (an unreadable body is an empty one) so a malformed
//! submission surfaces as a field-validation error, never a 500.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::core::seed::{seed_for_date, seed_from_name, today_key};
use crate::play::build::build_play;
use crate::play::config::{generate_play_config, PlayConfig};
use crate::score::{parse_events, read_is_correct, score_attempt};
use crate::server::error::{ApiError, ApiResult};
use crate::server::password::{hash_password, verify_password};
use crate::server::session::{Session, SessionData};
use crate::server::AppState;
use crate::store::{AttemptFilter, NewAttempt};

/// Build the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/me", get(handle_me))
        .route("/api/auth/register", post(handle_register))
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/play/today", get(handle_play_today))
        .route(
            "/api/attempts",
            get(handle_attempts_list).post(handle_attempts_create),
        )
        .route("/api/admin/override", post(handle_admin_override))
        .layer(cors)
        .with_state(state)
}

/// Lenient body parse: anything unreadable is an empty payload.
fn parse_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn str_field<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str)
}

// ── Health & identity ───────────────────────────────────────────────

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn handle_me(State(state): State<AppState>, session: Session) -> ApiResult<Json<Value>> {
    let Some(user_id) = session.data.user_id else {
        return Ok(Json(json!({ "authenticated": false })));
    };
    match state.store.user_by_id(user_id)? {
        Some(user) => Ok(Json(json!({
            "authenticated": true,
            "email": user.email,
            "is_admin": session.data.is_admin,
        }))),
        // Stale session pointing at a deleted user.
        None => Ok(Json(json!({ "authenticated": false }))),
    }
}

// ── Authentication ──────────────────────────────────────────────────

async fn handle_register(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> ApiResult<Response> {
    let payload = parse_body(&body);
    let (email, password) = credentials(&payload)?;

    if state.store.user_by_email(email)?.is_some() {
        return Err(ApiError::BadRequest("Email already exists".to_string()));
    }

    let user = state.store.create_user(email, &hash_password(password))?;
    bind_user(&state, &session, user.id, email);

    Ok((session.cookie(), Json(json!({ "status": "registered" }))).into_response())
}

async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> ApiResult<Response> {
    let payload = parse_body(&body);
    let (email, password) = credentials(&payload)?;

    let user = state
        .store
        .user_by_email(email)?
        .ok_or_else(invalid_credentials)?;
    let stored_hash = user.password_hash.as_deref().ok_or_else(invalid_credentials)?;
    if !verify_password(stored_hash, password) {
        return Err(invalid_credentials());
    }

    bind_user(&state, &session, user.id, email);

    Ok((session.cookie(), Json(json!({ "status": "logged_in" }))).into_response())
}

async fn handle_logout(State(state): State<AppState>, session: Session) -> Response {
    state.sessions.remove(&session.token);
    (
        Session::clear_cookie(),
        Json(json!({ "status": "logged_out" })),
    )
        .into_response()
}

fn credentials(payload: &Value) -> ApiResult<(&str, &str)> {
    match (str_field(payload, "email"), str_field(payload, "password")) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(ApiError::BadRequest(
            "Email and password required".to_string(),
        )),
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid credentials".to_string())
}

fn bind_user(state: &AppState, session: &Session, user_id: i64, email: &str) {
    state.sessions.insert(
        session.token.clone(),
        SessionData {
            user_id: Some(user_id),
            is_admin: state.config.is_admin_email(email),
            override_play: session.data.override_play.clone(),
        },
    );
}

// ── Play serving ────────────────────────────────────────────────────

async fn handle_play_today(session: Session) -> Json<crate::play::ServedPlay> {
    let today = today_key();
    let config = match session.data.override_play.as_deref() {
        Some(override_name) => {
            let mut config = generate_play_config(seed_from_name(override_name));
            config.name = override_name.to_string();
            config
        }
        None => generate_play_config(seed_for_date(&today)),
    };
    let play = build_play(&config);
    // The coverage answer stays server-side until a submission reveals it.
    Json(play.into_served(today))
}

// ── Attempts ────────────────────────────────────────────────────────

/// Resolve the config an attempt is scored against.
///
/// The daily play's seed is date-derived, so try the submitted date first;
/// when the generated name matches, the serve-time coverage and the scoring
/// coverage are guaranteed to agree. Anything else is an override play whose
/// name alone reproduces its seed.
fn resolve_scoring_config(play_name: &str, play_date: &str) -> PlayConfig {
    let daily = generate_play_config(seed_for_date(play_date));
    if daily.name == play_name {
        return daily;
    }
    let mut config = generate_play_config(seed_from_name(play_name));
    config.name = play_name.to_string();
    config
}

async fn handle_attempts_create(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> ApiResult<Response> {
    let payload = parse_body(&body);

    // Sorted so the error message is deterministic.
    const REQUIRED: [&str; 5] = [
        "coverage_guess",
        "events",
        "play_date",
        "play_name",
        "route_selections",
    ];
    let missing: Vec<&str> = REQUIRED
        .into_iter()
        .filter(|key| payload.get(key).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Missing fields: {}",
            missing.join(", ")
        )));
    }

    let play_name = str_field(&payload, "play_name")
        .ok_or_else(|| ApiError::BadRequest("play_name must be a string".to_string()))?;
    let play_date = str_field(&payload, "play_date")
        .ok_or_else(|| ApiError::BadRequest("play_date must be a string".to_string()))?;
    let coverage_guess = str_field(&payload, "coverage_guess")
        .ok_or_else(|| ApiError::BadRequest("coverage_guess must be a string".to_string()))?;
    let route_selections = payload
        .get("route_selections")
        .filter(|v| v.is_object())
        .cloned()
        .ok_or_else(|| ApiError::BadRequest("route_selections must be an object".to_string()))?;
    let events_raw = payload
        .get("events")
        .filter(|v| v.is_array())
        .cloned()
        .ok_or_else(|| ApiError::BadRequest("events must be an array".to_string()))?;
    let client_id = str_field(&payload, "client_id").map(str::to_string);

    let config = resolve_scoring_config(play_name, play_date);
    let read_correct = read_is_correct(coverage_guess, &config.coverage);
    let events = parse_events(&events_raw);
    let score = score_attempt(&events, read_correct);

    let stored = state.store.create_attempt(NewAttempt {
        user_id: session.data.user_id,
        play_name: play_name.to_string(),
        play_date: play_date.to_string(),
        route_selections,
        events: events_raw,
        score,
        coverage: config.coverage.clone(),
        client_id,
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "attempt": stored,
            "coverage": config.coverage,
            "score": stored.score,
        })),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    play_name: Option<String>,
}

async fn handle_attempts_list(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<crate::store::Attempt>>> {
    let filter = AttemptFilter {
        user_id: session.data.user_id,
        play_name: query.play_name,
    };
    Ok(Json(state.store.list_attempts(&filter)?))
}

// ── Admin ───────────────────────────────────────────────────────────

async fn handle_admin_override(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> ApiResult<Response> {
    if !session.data.is_admin {
        return Err(ApiError::Forbidden("Unauthorized".to_string()));
    }

    let payload = parse_body(&body);
    let play_name = str_field(&payload, "play_name").filter(|name| !name.is_empty());

    let mut data = session.data.clone();
    let body = match play_name {
        Some(name) => {
            data.override_play = Some(name.to_string());
            json!({ "status": "set", "play_name": name })
        }
        None => {
            data.override_play = None;
            json!({ "status": "cleared" })
        }
    };
    state.sessions.insert(session.token.clone(), data);

    Ok((session.cookie(), Json(body)).into_response())
}
