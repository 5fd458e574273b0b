//! Scoring Engine
//!
//! A pure function of the submitted trace and the read-correct signal. No
//! hidden state: the same inputs always produce the same score, which is what
//! lets an attempt be re-scored later from its stored events.

use crate::score::event::TraceEvent;

/// Base score when the coverage read was correct.
pub const CORRECT_READ_BASE: f64 = 350.0;

/// Base score when the read was wrong.
pub const INCORRECT_READ_BASE: f64 = 150.0;

/// Bonus for completing the pass.
pub const COMPLETION_BONUS: f64 = 400.0;

/// Penalty for throwing an interception.
pub const INTERCEPTION_PENALTY: f64 = 350.0;

/// Penalty for taking a sack.
pub const SACK_PENALTY: f64 = 150.0;

/// Points per unit of receiver separation at the target.
pub const SEPARATION_MULTIPLIER: f64 = 40.0;

/// Ceiling on the separation bonus.
pub const SEPARATION_CAP: f64 = 200.0;

/// Maximum final score.
pub const MAX_SCORE: f64 = 1000.0;

/// Did the guess match the generated coverage?
///
/// Case-insensitive, guess whitespace trimmed.
pub fn read_is_correct(coverage_guess: &str, coverage: &str) -> bool {
    coverage_guess.trim().to_lowercase() == coverage.to_lowercase()
}

/// Score a submitted trace.
///
/// Base by read correctness, a flat bonus for any completion, flat penalties
/// for any interception or sack, plus the best separation across `target`
/// events scaled and capped. Rounded to 2 decimals, clamped to
/// `[0, MAX_SCORE]`.
pub fn score_attempt(events: &[TraceEvent], read_correct: bool) -> f64 {
    let mut score = if read_correct {
        CORRECT_READ_BASE
    } else {
        INCORRECT_READ_BASE
    };

    if events.iter().any(|e| e.kind == "complete") {
        score += COMPLETION_BONUS;
    }
    if events.iter().any(|e| e.kind == "interception") {
        score -= INTERCEPTION_PENALTY;
    }
    if events.iter().any(|e| e.kind == "sack") {
        score -= SACK_PENALTY;
    }

    let separation = events
        .iter()
        .filter(|e| e.kind == "target")
        .filter_map(|e| e.payload_f64("separation"))
        .fold(0.0, f64::max);
    score += SEPARATION_CAP.min(separation * SEPARATION_MULTIPLIER);

    ((score * 100.0).round() / 100.0).clamp(0.0, MAX_SCORE)
}

// =============================================================================
// TESTS
// =============================================================================
