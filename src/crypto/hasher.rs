//! Master-password hashing with PBKDF2-HMAC-SHA256.
//!
//! The stored artifact is `base64(salt || derived_key)`: a random 16-byte
//! salt followed by a 32-byte key stretched over 100 000 iterations.
//! The password itself is never written anywhere.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::{Rng, RngCore};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{PassVaultError, Result};

/// Length of the random salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits).
pub const HASH_LEN: usize = 32;

/// PBKDF2 iteration count.  Part of the artifact format: changing it
/// invalidates every existing `master.key`.
pub const ITERATIONS: u32 = 100_000;

/// Minimum accepted master-password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Default length for generated passwords.
pub const DEFAULT_GENERATED_LEN: usize = 16;

const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Hash `password` with a fresh random salt.
///
/// Two calls with the same password return different artifacts.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);

    let mut derived = derive(password, &salt);

    let mut artifact = [0u8; SALT_LEN + HASH_LEN];
    artifact[..SALT_LEN].copy_from_slice(&salt);
    artifact[SALT_LEN..].copy_from_slice(&derived);
    let encoded = BASE64.encode(artifact);

    derived.zeroize();
    artifact.zeroize();
    encoded
}

/// Check `password` against a stored artifact.
///
/// Returns `false` on any decode or length problem instead of an error.
/// The derived keys are compared in constant time.
pub fn verify_password(password: &str, artifact: &str) -> bool {
    let Ok(decoded) = BASE64.decode(artifact.trim()) else {
        return false;
    };
    let decoded = Zeroizing::new(decoded);

    if decoded.len() != SALT_LEN + HASH_LEN {
        return false;
    }

    let (salt, stored) = decoded.split_at(SALT_LEN);
    let mut computed = derive(password, salt);
    let matches: bool = computed.as_slice().ct_eq(stored).into();
    computed.zeroize();
    matches
}

/// Password strength policy.
///
/// True iff the password has at least 8 characters and contains a
/// lowercase letter, an uppercase letter, a decimal digit (`0`-`9`) and a
/// character that is neither a letter nor a decimal digit.
pub fn is_strong(password: &str) -> bool {
    if password.trim().is_empty() || password.chars().count() < MIN_PASSWORD_LEN {
        return false;
    }

    let has_lower = password.chars().any(char::is_lowercase);
    let has_upper = password.chars().any(char::is_uppercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphabetic() && !c.is_ascii_digit());

    has_lower && has_upper && has_digit && has_symbol
}

/// Generate a random password of `length` characters.
///
/// Characters are drawn uniformly from upper case, lower case, digits and
/// symbols.  Candidates that fail `is_strong` are discarded and redrawn.
/// Lengths below 8 can never satisfy the policy and are rejected.
pub fn generate_password(length: usize) -> Result<Zeroizing<String>> {
    if length < MIN_PASSWORD_LEN {
        return Err(PassVaultError::CommandFailed(format!(
            "generated passwords must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let alphabet: Vec<char> = [UPPER, LOWER, DIGITS, SYMBOLS].concat().chars().collect();
    let mut rng = rand::rng();

    loop {
        let candidate: Zeroizing<String> = Zeroizing::new(
            (0..length)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                .collect(),
        );

        if is_strong(&candidate) {
            return Ok(candidate);
        }
    }
}

fn derive(password: &str, salt: &[u8]) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ITERATIONS, &mut out);
    out
}
