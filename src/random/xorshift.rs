//! 64-bit XorShift byte generator.
//!
//! The register is a signed 64-bit integer advanced by
//! `s ^= s << 13; s ^= s >> 17; s ^= s << 5`, where the right shift is
//! arithmetic and bits shifted past bit 63 are lost. Each step yields the
//! low byte of the register.
//!
//! Seeding and reseeding only ever load 32 bits: the register starts every
//! epoch below `2^32` and the upper half fills in during later steps.

use crate::error::DrsaError;
use crate::random::seed::SEED_LEN;
use crate::utils::converter;

/// XorShift generator over a 64-bit two's-complement register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift {
    state: i64,
}

impl XorShift {
    /// Creates a generator from a 64-byte seed block.
    ///
    /// The block is folded big-endian and its lower 32 bits become the
    /// register.
    ///
    /// # Errors
    /// Returns [`DrsaError::InvalidSeedBlock`] if `block.len() != 64`.
    pub fn from_seed_block(block: &[u8]) -> Result<Self, DrsaError> {
        if block.len() != SEED_LEN {
            return Err(DrsaError::InvalidSeedBlock { len: block.len() });
        }
        let mut generator = XorShift { state: 0 };
        generator.reseed(block);
        Ok(generator)
    }

    /// Creates a generator with an explicit register value.
    pub fn with_state(state: i64) -> Self {
        XorShift { state }
    }

    /// Replaces the register with the lower 32 bits of `block` read as a
    /// big-endian integer.
    pub fn reseed(&mut self, block: &[u8]) {
        self.state = i64::from(converter::fold_low_u32(block));
    }

    /// Advances the register one step and returns its low byte.
    pub fn next_byte(&mut self) -> u8 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        (s & 0xFF) as u8
    }

    /// Current register value.
    pub fn state(&self) -> i64 {
        self.state
    }
}
