//! Submitted Trace Events
//!
//! The client records what happened during a rep and submits it as a JSON
//! event list. The type set is open (clients may log events the scorer does
//! not know) and payloads are untrusted free-form objects, so parsing is
//! lenient by construction: malformed fields degrade to zero/absent instead
//! of failing the submission.

use serde_json::Value;

/// One item from a submitted event trace.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceEvent {
    /// Event type ("complete", "interception", "target", …).
    pub kind: String,
    /// Elapsed time when the event fired, in seconds.
    pub t: f64,
    /// Type-specific payload fields.
    pub payload: Value,
}

impl TraceEvent {
    /// Build an event from raw submitted JSON, leniently.
    ///
    /// A missing or non-string `type` becomes the empty string (the scorer
    /// matches no rule for it); a missing or non-numeric `t` becomes zero.
    pub fn from_value(raw: &Value) -> Self {
        Self {
            kind: raw
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            t: raw.get("t").and_then(Value::as_f64).unwrap_or(0.0),
            payload: raw.get("payload").cloned().unwrap_or(Value::Null),
        }
    }

    /// Read a numeric payload field, tolerating junk.
    ///
    /// Accepts JSON numbers, numeric strings, and booleans; anything else —
    /// including non-finite parses — reads as absent.
    pub fn payload_f64(&self, key: &str) -> Option<f64> {
        let field = self.payload.get(key)?;
        match field {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

/// Parse a submitted event array into trace events.
///
/// Non-array input yields an empty trace; non-object items degrade to empty
/// events rather than poisoning the rest of the list.
pub fn parse_events(raw: &Value) -> Vec<TraceEvent> {
    raw.as_array()
        .map(|items| items.iter().map(TraceEvent::from_value).collect())
        .unwrap_or_default()
}
