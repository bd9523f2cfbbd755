//! Prime search utilities for the DRSA key deriver.
//!
//! [`next_prime`] walks odd candidates upwards and runs one probabilistic
//! primality test (Baillie-PSW plus Miller-Rabin rounds, from
//! `num-bigint-dig`) per candidate. [`sift_small_factors`] then screens a
//! prime candidate against the fixed table of primes below 1000 in a
//! single ascending pass.

use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use tracing::trace;

use crate::error::DrsaError;
use crate::interrupt::Interrupt;

/// Default number of Miller-Rabin rounds per primality test.
pub const DEFAULT_PRIMALITY_ROUNDS: usize = 20;

/// All 168 primes below 1000, ascending.
#[rustfmt::skip]
pub static SMALL_PRIMES: [u32; 168] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37,
    41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151,
    157, 163, 167, 173, 179, 181, 191, 193, 197, 199, 211, 223,
    227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281,
    283, 293, 307, 311, 313, 317, 331, 337, 347, 349, 353, 359,
    367, 373, 379, 383, 389, 397, 401, 409, 419, 421, 431, 433,
    439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503,
    509, 521, 523, 541, 547, 557, 563, 569, 571, 577, 587, 593,
    599, 601, 607, 613, 617, 619, 631, 641, 643, 647, 653, 659,
    661, 673, 677, 683, 691, 701, 709, 719, 727, 733, 739, 743,
    751, 757, 761, 769, 773, 787, 797, 809, 811, 821, 823, 827,
    829, 839, 853, 857, 859, 863, 877, 881, 883, 887, 907, 911,
    919, 929, 937, 941, 947, 953, 967, 971, 977, 983, 991, 997,
];

/// Returns `true` if `candidate` is prime with overwhelming probability.
///
/// # Parameters
/// - `candidate`: Number to test.
/// - `rounds`: Miller-Rabin rounds run on top of the Baillie-PSW test.
pub fn is_probable_prime(candidate: &BigUint, rounds: usize) -> bool {
    probably_prime(candidate, rounds)
}

/// Finds the smallest prime strictly greater than `n`.
///
/// `interrupt` is polled with [`Interrupt::poll_costly`] once before every
/// primality test, so a deadline is checked per candidate.
///
/// # Errors
/// Returns [`DrsaError::Interrupted`] if `interrupt` stops the search.
///
/// # Examples
///
/// ```
/// use drsa::interrupt::Unbounded;
/// use drsa::primes::next_prime;
/// use num_bigint_dig::BigUint;
///
/// let p = next_prime(&BigUint::from(1000u32), 20, &mut Unbounded).unwrap();
/// assert_eq!(p, BigUint::from(1009u32));
/// ```
pub fn next_prime(
    n: &BigUint,
    rounds: usize,
    interrupt: &mut dyn Interrupt,
) -> Result<BigUint, DrsaError> {
    let two = BigUint::from(2u32);
    if *n < two {
        return Ok(two);
    }

    let mut candidate = n + &BigUint::one();
    if candidate.is_even() {
        candidate += BigUint::one();
    }
    loop {
        interrupt.poll_costly()?;
        if probably_prime(&candidate, rounds) {
            return Ok(candidate);
        }
        candidate += &two;
    }
}

/// Screens `candidate` against [`SMALL_PRIMES`] in one ascending pass.
///
/// Whenever the current candidate is divisible by the small prime under
/// test, it is replaced by the next prime above it and the pass continues
/// with the following small prime. Earlier small primes are not tested
/// again against a replacement.
///
/// # Errors
/// Returns [`DrsaError::Interrupted`] if a replacement search is stopped.
pub fn sift_small_factors(
    candidate: BigUint,
    rounds: usize,
    interrupt: &mut dyn Interrupt,
) -> Result<BigUint, DrsaError> {
    let mut candidate = candidate;
    for &small in SMALL_PRIMES.iter() {
        let divisor = BigUint::from(small);
        if (&candidate % &divisor).is_zero() {
            candidate = next_prime(&candidate, rounds, interrupt)?;
            trace!(small_prime = small, "candidate advanced past small factor");
        }
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interrupt::{InterruptReason, Unbounded, Watchdog};

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    fn next(n: u64) -> BigUint {
        next_prime(&big(n), DEFAULT_PRIMALITY_ROUNDS, &mut Unbounded).unwrap()
    }

    #[test]
    fn test_small_primes_table() {
        assert_eq!(SMALL_PRIMES.len(), 168);
        assert_eq!(SMALL_PRIMES[0], 2);
        assert_eq!(SMALL_PRIMES[167], 997);
        assert!(SMALL_PRIMES.windows(2).all(|w| w[0] < w[1]));
        for &p in SMALL_PRIMES.iter() {
            assert!(is_probable_prime(&big(p as u64), DEFAULT_PRIMALITY_ROUNDS));
        }
    }

    #[test]
    fn test_next_prime_below_two() {
        assert_eq!(next(0), big(2));
        assert_eq!(next(1), big(2));
    }

    #[test]
    fn test_next_prime_is_strictly_greater() {
        assert_eq!(next(2), big(3));
        assert_eq!(next(3), big(5));
        assert_eq!(next(10), big(11));
        assert_eq!(next(11), big(13));
        assert_eq!(next(1000), big(1009));
        assert_eq!(next(4096), big(4099));
        assert_eq!(next(8192), big(8209));
        assert_eq!(next(917518), big(917519));
    }

    #[test]
    fn test_next_prime_mersenne() {
        // 2^61 - 1 is prime
        assert_eq!(next((1u64 << 61) - 2), big((1u64 << 61) - 1));
    }

    #[test]
    fn test_is_probable_prime_rejects_composites() {
        for n in [0u64, 1, 4, 9, 561, 1105, 3027, 1_000_000] {
            assert!(!is_probable_prime(&big(n), DEFAULT_PRIMALITY_ROUNDS), "{}", n);
        }
    }

    #[test]
    fn test_next_prime_polls_once_per_candidate() {
        // Candidates above 1000: 1001, 1003, 1005, 1007, 1009
        let mut watchdog = Watchdog::new();
        let p = next_prime(&big(1000), DEFAULT_PRIMALITY_ROUNDS, &mut watchdog).unwrap();
        assert_eq!(p, big(1009));
        assert_eq!(watchdog.steps(), 5);
    }

    #[test]
    fn test_next_prime_interrupted() {
        let mut watchdog = Watchdog::new().with_step_budget(2);
        let err = next_prime(&big(1000), DEFAULT_PRIMALITY_ROUNDS, &mut watchdog).unwrap_err();
        assert_eq!(
            err,
            DrsaError::Interrupted {
                reason: InterruptReason::StepBudgetExhausted
            }
        );
    }

    #[test]
    fn test_next_prime_checks_deadline_per_candidate() {
        let mut watchdog = Watchdog::new().with_timeout(std::time::Duration::from_millis(30));
        watchdog.poll().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(40));
        let err = next_prime(&big(1000), DEFAULT_PRIMALITY_ROUNDS, &mut watchdog).unwrap_err();
        assert_eq!(
            err,
            DrsaError::Interrupted {
                reason: InterruptReason::DeadlineExceeded
            }
        );
        assert_eq!(watchdog.steps(), 1);
    }

    #[test]
    fn test_sift_large_prime_unchanged() {
        let sifted =
            sift_small_factors(big(4099), DEFAULT_PRIMALITY_ROUNDS, &mut Unbounded).unwrap();
        assert_eq!(sifted, big(4099));
    }

    #[test]
    fn test_sift_small_prime_climbs_table() {
        // A small prime matches its own table entry, and every replacement
        // is the next table entry, so the pass ends above 997
        for start in [2u64, 3, 97, 991, 997] {
            let sifted =
                sift_small_factors(big(start), DEFAULT_PRIMALITY_ROUNDS, &mut Unbounded)
                    .unwrap();
            assert_eq!(sifted, big(1009), "start {}", start);
        }
    }

    #[test]
    fn test_sift_composite_replaced_once() {
        // 3027 = 3 * 1009: skipped by 2, replaced at 3 by 3037, kept afterwards
        let sifted =
            sift_small_factors(big(3027), DEFAULT_PRIMALITY_ROUNDS, &mut Unbounded).unwrap();
        assert_eq!(sifted, big(3037));
    }

    #[test]
    fn test_sift_interrupted() {
        let mut watchdog = Watchdog::new().with_step_budget(0);
        let err = sift_small_factors(big(2), DEFAULT_PRIMALITY_ROUNDS, &mut watchdog).unwrap_err();
        assert!(err.is_interrupted());
    }

    #[test]
    fn test_sift_post_condition() {
        let mut n = big(1u64 << 40);
        for _ in 0..20 {
            let p = next_prime(&n, DEFAULT_PRIMALITY_ROUNDS, &mut Unbounded).unwrap();
            let sifted =
                sift_small_factors(p.clone(), DEFAULT_PRIMALITY_ROUNDS, &mut Unbounded).unwrap();
            for &small in SMALL_PRIMES.iter() {
                assert!(!(&sifted % &big(small as u64)).is_zero());
            }
            n = p;
        }
    }
}
