//! Tunable parameters of the key derivation pipeline.

use crate::error::DrsaError;
use crate::primes::DEFAULT_PRIMALITY_ROUNDS;

/// Default number of generator bytes consumed by the key deriver.
///
/// 512 bytes split into two 2048-bit halves, giving a modulus of about
/// 4096 bits.
pub const DEFAULT_SEED_LEN: usize = 512;

/// Parameters of [`KeyGenerator`](crate::keygen::KeyGenerator).
///
/// # Examples
///
/// ```
/// use drsa::config::DrsaConfig;
///
/// let config = DrsaConfig::default().with_seed_len(128).unwrap();
/// assert_eq!(config.seed_len(), 128);
/// assert_eq!(config.primality_rounds(), 20);
///
/// assert!(DrsaConfig::default().with_seed_len(1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrsaConfig {
    seed_len: usize,
    primality_rounds: usize,
}

impl Default for DrsaConfig {
    fn default() -> Self {
        DrsaConfig {
            seed_len: DEFAULT_SEED_LEN,
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
        }
    }
}

impl DrsaConfig {
    /// Creates a configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of generator bytes fed to the key deriver.
    ///
    /// # Errors
    /// Returns [`DrsaError::InvalidConfig`] if `seed_len < 2`.
    pub fn with_seed_len(mut self, seed_len: usize) -> Result<Self, DrsaError> {
        if seed_len < 2 {
            return Err(DrsaError::InvalidConfig {
                details: format!("seed length must be at least 2 bytes, got {}", seed_len),
            });
        }
        self.seed_len = seed_len;
        Ok(self)
    }

    /// Sets the number of Miller-Rabin rounds per primality test.
    ///
    /// # Errors
    /// Returns [`DrsaError::InvalidConfig`] if `rounds == 0`.
    pub fn with_primality_rounds(mut self, rounds: usize) -> Result<Self, DrsaError> {
        if rounds == 0 {
            return Err(DrsaError::InvalidConfig {
                details: "primality rounds must be at least 1".to_string(),
            });
        }
        self.primality_rounds = rounds;
        Ok(self)
    }

    /// Number of generator bytes fed to the key deriver.
    pub fn seed_len(&self) -> usize {
        self.seed_len
    }

    /// Miller-Rabin rounds per primality test.
    pub fn primality_rounds(&self) -> usize {
        self.primality_rounds
    }
}
