//! Seed Derivation
//!
//! Maps a date or a play name onto the 32-bit seed space. The procedure is
//! load-bearing for cross-session reproducibility: the seed is the only thing
//! that has to survive between serving a play and re-scoring a submission, so
//! the digest algorithm and truncation must never change.

use chrono::Utc;
use chrono_tz::Tz;
use sha2::{Digest, Sha256};

use super::rng::PlayRng;

/// Fixed time zone for the daily rollover.
pub const DAILY_ZONE: Tz = chrono_tz::America::New_York;

/// Derive a 32-bit seed from an arbitrary key string.
///
/// SHA-256 of the key, interpreted as a big integer, reduced modulo 2^32 —
/// equivalently, the last four digest bytes read big-endian. Identical input
/// yields identical output on every platform.
pub fn seed_from_key(key: &str) -> u32 {
    let digest = Sha256::digest(key.as_bytes());
    let tail: [u8; 4] = digest[28..32].try_into().expect("digest is 32 bytes");
    u32::from_be_bytes(tail)
}

/// Derive the seed for a play name.
///
/// Lets a previously served play be reconstructed from its name alone, which
/// is how admin overrides and attempt re-scoring work.
pub fn seed_from_name(play_name: &str) -> u32 {
    seed_from_key(play_name)
}

/// Derive the seed for a `YYYY-MM-DD` date key.
pub fn seed_for_date(date_key: &str) -> u32 {
    seed_from_key(date_key)
}

/// Today's date key in the daily zone, formatted `YYYY-MM-DD`.
pub fn today_key() -> String {
    Utc::now()
        .with_timezone(&DAILY_ZONE)
        .format("%Y-%m-%d")
        .to_string()
}

/// The seed for today's play.
pub fn seed_for_today() -> u32 {
    seed_for_date(&today_key())
}

/// Convenience: the primary draw stream for a seed.
pub fn rng_for_seed(seed: u32) -> PlayRng {
    PlayRng::new(seed)
}

// =============================================================================
// TESTS
// =============================================================================
