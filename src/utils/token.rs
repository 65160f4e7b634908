//! Opaque token generation.

use rand::rngs::OsRng;
use rand::TryRngCore;

/// Length of issued `our_param` tokens.
pub const TOKEN_LEN: usize = 10;

/// URL-query-safe alphabet: letters, digits, `_`, `-`. 64 symbols, so each
/// random byte maps uniformly onto one symbol.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generates a 10-character random token from the URL-safe alphabet.
///
/// Drawn from the OS RNG. No collision check is performed; at 60 bits of
/// entropy a collision at the service's expected volume is treated as
/// statistically impossible.
pub fn generate_token() -> String {
    let mut buf = [0u8; TOKEN_LEN];
    OsRng.try_fill_bytes(&mut buf).expect("OsRng failed");
    buf.iter()
        .map(|b| ALPHABET[(b & 0x3f) as usize] as char)
        .collect()
}
