//! Error types for the DRSA library.

use thiserror::Error;

use crate::interrupt::InterruptReason;

/// Errors produced by the DRSA library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrsaError {
    /// Iteration count is zero.
    #[error("Iteration count must be at least 1")]
    InvalidIterationCount,
    /// Confusion string has no characters.
    #[error("Confusion string must be at least 1 character long")]
    EmptyConfusionString,
    /// Confusion string does not fit inside a SHA-256 digest slice.
    #[error("Confusion string has {len} characters, the maximum is 31")]
    ConfusionStringTooLong { len: usize },
    /// Seed block passed to the generator is not 64 bytes long.
    #[error("Seed block must be 64 bytes long, got {len}")]
    InvalidSeedBlock { len: usize },
    /// DRSA seed cannot be split into two non-empty halves.
    #[error("DRSA seed must hold at least 2 bytes, got {len}")]
    SeedTooShort { len: usize },
    /// A configuration value is outside its valid range.
    #[error("Invalid configuration: {details}")]
    InvalidConfig { details: String },
    /// Externally supplied RSA integers do not form a key of this library.
    #[error("Invalid key components: {details}")]
    InvalidComponents { details: String },
    /// Both halves of the seed led to the same prime.
    #[error("Derived primes p and q are identical")]
    IdenticalPrimes,
    /// The public exponent has no inverse modulo phi.
    #[error("Public exponent is not invertible modulo phi")]
    NoModularInverse,
    /// The private exponent came out as 1.
    #[error("Private exponent d is 1")]
    TrivialPrivateExponent,
    /// `(e * d) mod phi` is not 1.
    #[error("Private exponent failed the (e * d) mod phi == 1 check")]
    InverseCheckFailed,
    /// An unbounded loop was stopped by its [`Interrupt`](crate::interrupt::Interrupt).
    #[error("Derivation interrupted: {reason}")]
    Interrupted { reason: InterruptReason },
    /// Encoding to an external key format failed.
    #[error("Key encoding failed: {details}")]
    Encoding { details: String },
}

/// Coarse classification of [`DrsaError`] values.
///
/// Invalid input never started any computation. A degenerate key means the
/// inputs are unusable and must be changed before deriving again. An
/// interruption means the inputs may be fine but the budget was too small.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidInput,
    DegenerateKey,
    Interrupted,
    Encoding,
}

impl DrsaError {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            DrsaError::InvalidIterationCount
            | DrsaError::EmptyConfusionString
            | DrsaError::ConfusionStringTooLong { .. }
            | DrsaError::InvalidSeedBlock { .. }
            | DrsaError::SeedTooShort { .. }
            | DrsaError::InvalidConfig { .. }
            | DrsaError::InvalidComponents { .. } => ErrorCategory::InvalidInput,
            DrsaError::IdenticalPrimes
            | DrsaError::NoModularInverse
            | DrsaError::TrivialPrivateExponent
            | DrsaError::InverseCheckFailed => ErrorCategory::DegenerateKey,
            DrsaError::Interrupted { .. } => ErrorCategory::Interrupted,
            DrsaError::Encoding { .. } => ErrorCategory::Encoding,
        }
    }

    /// Returns `true` if the inputs produced an unusable key.
    pub fn is_degenerate_key(&self) -> bool {
        self.category() == ErrorCategory::DegenerateKey
    }

    /// Returns `true` if the operation was stopped before finishing.
    pub fn is_interrupted(&self) -> bool {
        self.category() == ErrorCategory::Interrupted
    }
}

impl From<InterruptReason> for DrsaError {
    fn from(reason: InterruptReason) -> Self {
        DrsaError::Interrupted { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_iteration_count() {
        let err = DrsaError::InvalidIterationCount;
        assert_eq!(format!("{}", err), "Iteration count must be at least 1");
    }

    #[test]
    fn test_display_confusion_string_too_long() {
        let err = DrsaError::ConfusionStringTooLong { len: 32 };
        assert_eq!(
            format!("{}", err),
            "Confusion string has 32 characters, the maximum is 31"
        );
    }

    #[test]
    fn test_display_seed_too_short() {
        let err = DrsaError::SeedTooShort { len: 1 };
        assert_eq!(format!("{}", err), "DRSA seed must hold at least 2 bytes, got 1");
    }

    #[test]
    fn test_display_interrupted() {
        let err = DrsaError::from(InterruptReason::DeadlineExceeded);
        assert_eq!(
            format!("{}", err),
            "Derivation interrupted: deadline exceeded"
        );
    }

    #[test]
    fn test_display_invalid_components() {
        let err = DrsaError::InvalidComponents {
            details: "modulus is not the product of p and q".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Invalid key components: modulus is not the product of p and q"
        );
        assert_eq!(err.category(), ErrorCategory::InvalidInput);
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            DrsaError::EmptyConfusionString.category(),
            ErrorCategory::InvalidInput
        );
        assert!(DrsaError::IdenticalPrimes.is_degenerate_key());
        assert!(DrsaError::NoModularInverse.is_degenerate_key());
        assert!(!DrsaError::NoModularInverse.is_interrupted());
        assert!(DrsaError::from(InterruptReason::Cancelled).is_interrupted());
        assert_eq!(
            DrsaError::Encoding {
                details: String::new()
            }
            .category(),
            ErrorCategory::Encoding
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(DrsaError::IdenticalPrimes, DrsaError::IdenticalPrimes);
        assert_ne!(DrsaError::IdenticalPrimes, DrsaError::NoModularInverse);
    }

    #[test]
    fn test_error_clone() {
        let err = DrsaError::ConfusionStringTooLong { len: 40 };
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
