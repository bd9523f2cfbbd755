//! Seed material derived from the textual inputs.
//!
//! The password and the confusion string feed two derivations:
//! 1. PBKDF2 with an HMAC-SHA1 core turns (password, confusion string,
//!    iteration count) into the 64-byte block that seeds the generator.
//! 2. A slice of the SHA-256 digest of the confusion string becomes the
//!    confusion pattern, the byte sequence the setup procedure hunts for.

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::DrsaError;

/// Length in bytes of the PBKDF2 output that seeds the generator.
pub const SEED_LEN: usize = 64;

/// Maximum confusion string length, in characters.
pub const MAX_CONFUSION_LEN: usize = DIGEST_LEN - 1;

/// SHA-256 digest length.
const DIGEST_LEN: usize = 32;

/// Derives the 64-byte generator seed with PBKDF2-HMAC-SHA1.
///
/// The password is the PBKDF2 password, the confusion string is the salt,
/// both UTF-8 encoded.
///
/// # Parameters
/// - `password`: Textual password.
/// - `confusion_string`: Textual confusion string, used as salt.
/// - `iterations`: PBKDF2 rounds (minimum 1).
///
/// # Errors
/// Returns [`DrsaError::InvalidIterationCount`] if `iterations == 0`.
///
/// # Examples
///
/// ```
/// use drsa::random::seed::derive_seed;
///
/// let seed = derive_seed("password", "salt", 2).unwrap();
/// assert_eq!(seed.len(), 64);
/// assert!(derive_seed("password", "salt", 0).is_err());
/// ```
pub fn derive_seed(
    password: &str,
    confusion_string: &str,
    iterations: u32,
) -> Result<[u8; SEED_LEN], DrsaError> {
    if iterations == 0 {
        return Err(DrsaError::InvalidIterationCount);
    }
    let mut seed = [0u8; SEED_LEN];
    pbkdf2_hmac::<Sha1>(
        password.as_bytes(),
        confusion_string.as_bytes(),
        iterations,
        &mut seed,
    );
    Ok(seed)
}

/// Computes the confusion pattern of a confusion string.
///
/// With `L` the number of characters of `confusion_string` and `H` the
/// SHA-256 digest of its UTF-8 bytes, the pattern is
/// `H[i..i + L]` where `i = (sum of all bytes of H) mod (32 - L)`.
///
/// # Errors
/// - [`DrsaError::EmptyConfusionString`] if the string is empty.
/// - [`DrsaError::ConfusionStringTooLong`] if it has more than
///   [`MAX_CONFUSION_LEN`] characters.
///
/// # Examples
///
/// ```
/// use drsa::random::seed::confusion_pattern;
///
/// assert_eq!(confusion_pattern("x").unwrap(), vec![172]);
/// assert_eq!(confusion_pattern("salt").unwrap().len(), 4);
/// ```
pub fn confusion_pattern(confusion_string: &str) -> Result<Vec<u8>, DrsaError> {
    let len = confusion_string.chars().count();
    if len == 0 {
        return Err(DrsaError::EmptyConfusionString);
    }
    if len > MAX_CONFUSION_LEN {
        return Err(DrsaError::ConfusionStringTooLong { len });
    }

    let digest = Sha256::digest(confusion_string.as_bytes());
    let sum: usize = digest.iter().map(|&b| usize::from(b)).sum();
    let index = sum % (DIGEST_LEN - len);
    Ok(digest[index..index + len].to_vec())
}
