//! Password Glue
//!
//! Salted, iterated HMAC-SHA256. This is surrounding-infrastructure glue,
//! not part of the core design; the stored format is self-describing
//! (`hmac-sha256$iterations$salt$digest`, hex fields) so the scheme can be
//! swapped without a migration flag day.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "hmac-sha256";
const ITERATIONS: u32 = 100_000;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4();
    let digest = derive(password.as_bytes(), salt.as_bytes(), ITERATIONS);
    format!(
        "{SCHEME}${ITERATIONS}${}${}",
        hex::encode(salt.as_bytes()),
        hex::encode(digest)
    )
}

/// Check a password against a stored hash. Unparseable hashes never match.
pub fn verify_password(stored: &str, password: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(iterations), Some(salt), Some(digest), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    let (Ok(salt), Ok(digest)) = (hex::decode(salt), hex::decode(digest)) else {
        return false;
    };

    let computed = derive(password.as_bytes(), &salt, iterations);
    constant_time_eq(&computed, &digest)
}

/// Iterated keyed digest: the password keys the MAC, the salt seeds the
/// chain, each round feeds the previous output back in.
fn derive(password: &[u8], salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut block = salt.to_vec();
    for _ in 0..iterations.max(1) {
        let mut mac =
            HmacSha256::new_from_slice(password).expect("hmac accepts any key length");
        mac.update(&block);
        block = mac.finalize().into_bytes().to_vec();
    }
    block
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
