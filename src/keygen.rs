//! KeyGenerator: the full deterministic key derivation pipeline.
//!
//! ```text
//! (password, confusion string, iteration count)
//!     → PBKDF2-HMAC-SHA1 seed        (random::seed)
//!     → XorShift register            (random::xorshift)
//!     → setup procedure              (random::prbg)
//!     → seed_len output bytes        (random::byte_source)
//!     → DRSA                         (drsa)
//!     → RsaParameters
//! ```
//!
//! One [`Interrupt`] is threaded through every unbounded stage, so a single
//! deadline or cancellation flag covers the whole derivation.

use tracing::debug;

use crate::config::DrsaConfig;
use crate::drsa::{self, RsaParameters};
use crate::error::DrsaError;
use crate::interrupt::{Interrupt, Unbounded};
use crate::random::byte_source::ByteSource;
use crate::random::prbg::Prbg;

/// Derives RSA key pairs and byte streams from textual inputs.
///
/// # Examples
///
/// ```
/// use drsa::{DrsaConfig, KeyGenerator};
///
/// let config = DrsaConfig::default().with_seed_len(32).unwrap();
/// let generator = KeyGenerator::with_config(config);
///
/// let first = generator.derive("password", "x", 1).unwrap();
/// let second = generator.derive("password", "x", 1).unwrap();
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyGenerator {
    config: DrsaConfig,
}

impl KeyGenerator {
    /// Creates a generator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with a custom configuration.
    pub fn with_config(config: DrsaConfig) -> Self {
        KeyGenerator { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &DrsaConfig {
        &self.config
    }

    /// Returns a set-up byte stream for the given inputs.
    ///
    /// # Errors
    /// Input validation errors from [`Prbg::new`].
    pub fn stream(
        &self,
        password: &str,
        confusion_string: &str,
        iteration_count: u32,
    ) -> Result<Prbg, DrsaError> {
        self.stream_with(password, confusion_string, iteration_count, &mut Unbounded)
    }

    /// Returns a set-up byte stream, polling `interrupt` during setup.
    ///
    /// # Errors
    /// Input validation errors from [`Prbg::new`], or
    /// [`DrsaError::Interrupted`].
    pub fn stream_with(
        &self,
        password: &str,
        confusion_string: &str,
        iteration_count: u32,
        interrupt: &mut dyn Interrupt,
    ) -> Result<Prbg, DrsaError> {
        let mut prbg = Prbg::new(password, confusion_string, iteration_count)?;
        prbg.setup_with(interrupt)?;
        Ok(prbg)
    }

    /// Derives the RSA parameters for the given inputs.
    ///
    /// # Errors
    /// Any error of [`stream`](Self::stream) or
    /// [`derive_rsa_with`](crate::drsa::derive_rsa_with).
    pub fn derive(
        &self,
        password: &str,
        confusion_string: &str,
        iteration_count: u32,
    ) -> Result<RsaParameters, DrsaError> {
        self.derive_with(password, confusion_string, iteration_count, &mut Unbounded)
    }

    /// Derives the RSA parameters, polling `interrupt` during setup and
    /// during every prime search.
    ///
    /// # Errors
    /// Any error of [`stream_with`](Self::stream_with) or
    /// [`derive_rsa_with`](crate::drsa::derive_rsa_with).
    pub fn derive_with(
        &self,
        password: &str,
        confusion_string: &str,
        iteration_count: u32,
        interrupt: &mut dyn Interrupt,
    ) -> Result<RsaParameters, DrsaError> {
        let mut prbg = self.stream_with(password, confusion_string, iteration_count, interrupt)?;
        debug!(
            steps = prbg.steps(),
            seed_len = self.config.seed_len(),
            "PRBG ready, deriving RSA parameters"
        );
        self.derive_from_source(&mut prbg, interrupt)
    }

    /// Derives RSA parameters from the next `seed_len` bytes of `source`.
    ///
    /// # Errors
    /// Any error of [`derive_rsa_with`](crate::drsa::derive_rsa_with).
    pub fn derive_from_source(
        &self,
        source: &mut dyn ByteSource,
        interrupt: &mut dyn Interrupt,
    ) -> Result<RsaParameters, DrsaError> {
        let seed = source.take_bytes(self.config.seed_len());
        drsa::derive_rsa_with(&seed, self.config.primality_rounds(), interrupt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interrupt::{InterruptReason, Watchdog};

    struct Fixed(Vec<u8>, usize);

    impl ByteSource for Fixed {
        fn next_byte(&mut self) -> u8 {
            let byte = self.0[self.1 % self.0.len()];
            self.1 += 1;
            byte
        }
    }

    fn small_generator() -> KeyGenerator {
        KeyGenerator::with_config(DrsaConfig::new().with_seed_len(4).unwrap())
    }

    #[test]
    fn test_stream_is_set_up() {
        let prbg = KeyGenerator::new().stream("password", "x", 1).unwrap();
        assert!(prbg.is_set_up());
        assert_eq!(prbg.steps(), 146);
    }

    #[test]
    fn test_stream_known_output() {
        let mut prbg = KeyGenerator::new().stream("password", "x", 1).unwrap();
        assert_eq!(prbg.take_bytes(4), vec![241, 229, 214, 165]);
    }

    #[test]
    fn test_derive_from_fixed_source() {
        let mut source = Fixed(vec![0x10, 0x00, 0x20, 0x00], 0);
        let params = small_generator()
            .derive_from_source(&mut source, &mut Unbounded)
            .unwrap();
        assert_eq!(params.n(), &num_bigint_dig::BigUint::from(33648691u32));
    }

    #[test]
    fn test_derive_from_degenerate_source() {
        let mut source = Fixed(vec![0x00], 0);
        let err = small_generator()
            .derive_from_source(&mut source, &mut Unbounded)
            .unwrap_err();
        assert_eq!(err, DrsaError::IdenticalPrimes);
    }

    #[test]
    fn test_derive_rejects_invalid_input_first() {
        let generator = KeyGenerator::new();
        assert_eq!(
            generator.derive("password", "x", 0).unwrap_err(),
            DrsaError::InvalidIterationCount
        );
        assert_eq!(
            generator.derive("password", "", 1).unwrap_err(),
            DrsaError::EmptyConfusionString
        );
    }

    #[test]
    fn test_derive_interrupted_during_setup() {
        let mut watchdog = Watchdog::new().with_step_budget(5);
        let err = small_generator()
            .derive_with("password", "x", 1, &mut watchdog)
            .unwrap_err();
        assert_eq!(
            err,
            DrsaError::Interrupted {
                reason: InterruptReason::StepBudgetExhausted
            }
        );
    }

    #[test]
    fn test_derive_interrupted_during_prime_search() {
        // Setup needs exactly 146 polls; the prime search gets none
        let mut watchdog = Watchdog::new().with_step_budget(146);
        let err = small_generator()
            .derive_with("password", "x", 1, &mut watchdog)
            .unwrap_err();
        assert!(err.is_interrupted());
        assert_eq!(watchdog.steps(), 146);
    }
}
