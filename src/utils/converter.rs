//! Byte-to-integer conversion utilities.
//!
//! Both the generator and the key deriver read byte blocks as unsigned
//! big-endian integers. The generator only keeps the lower 32 bits of the
//! result, while the key deriver keeps the whole value.

use num_bigint_dig::BigUint;

/// Folds a byte slice into an integer by big-endian accumulation and
/// returns its lower 32 bits.
///
/// Equivalent to interpreting `input` as an unbounded big-endian integer and
/// masking with `0xFFFF_FFFF`, so only the last four bytes matter.
///
/// # Parameters
/// - `input`: Bytes to fold, most significant first. May be empty.
///
/// # Returns
/// The lower 32 bits of the folded value (`0` for an empty slice).
pub fn fold_low_u32(input: &[u8]) -> u32 {
    // Bits shifted past position 31 are exactly the bits the mask drops
    input
        .iter()
        .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte))
}

/// Splits a byte slice into two halves.
///
/// The first half holds `input.len() / 2` bytes (rounded down), the second
/// half holds the remainder.
pub fn split_halves(input: &[u8]) -> (&[u8], &[u8]) {
    input.split_at(input.len() / 2)
}

/// Interprets a byte slice as an unsigned big-endian integer.
///
/// An empty slice reads as zero.
pub fn to_biguint(input: &[u8]) -> BigUint {
    BigUint::from_bytes_be(input)
}
