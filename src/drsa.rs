//! DRSA: deterministic RSA parameters from a byte block.
//!
//! The block is cut in two halves read as big-endian integers. The next
//! prime above each half, screened against the primes below 1000, gives
//! `p` and `q`. With the fixed public exponent 65537 everything else
//! follows: `n = p * q`, `phi = (p - 1)(q - 1)`, `d = e^-1 mod phi`.
//!
//! Degenerate blocks are rejected, never repaired: the same bytes always
//! give the same key or the same error.

use num_bigint_dig::{BigInt, BigUint, Sign, ToBigUint};
use num_traits::{One, Zero};
use tracing::{debug, warn};

use crate::error::DrsaError;
use crate::interrupt::{Interrupt, Unbounded};
use crate::primes::{self, DEFAULT_PRIMALITY_ROUNDS};
use crate::utils::converter;

/// Fixed public exponent, `2^16 + 1`.
pub const PUBLIC_EXPONENT: u32 = 65537;

/// Parameters of an RSA key pair.
///
/// Every instance satisfies `p != q`, `n == p * q`, `d != 1` and
/// `(e * d) mod phi == 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaParameters {
    n: BigUint,
    e: BigUint,
    d: BigUint,
    p: BigUint,
    q: BigUint,
    phi: BigUint,
}

/// Derives RSA parameters from `seed` with no time limit.
///
/// # Errors
/// See [`derive_rsa_with`].
///
/// # Examples
///
/// ```
/// use drsa::derive_rsa;
/// use num_bigint_dig::BigUint;
///
/// let params = derive_rsa(&[0x10, 0x00, 0x20, 0x00]).unwrap();
/// assert_eq!(params.p(), &BigUint::from(4099u32));
/// assert_eq!(params.q(), &BigUint::from(8209u32));
///
/// // Identical halves give identical primes
/// assert!(derive_rsa(&[0u8; 8]).is_err());
/// ```
pub fn derive_rsa(seed: &[u8]) -> Result<RsaParameters, DrsaError> {
    derive_rsa_with(seed, DEFAULT_PRIMALITY_ROUNDS, &mut Unbounded)
}

/// Derives RSA parameters from `seed`, polling `interrupt` before every
/// primality test.
///
/// # Parameters
/// - `seed`: At least 2 bytes; the first `len / 2` bytes give `p`, the rest
///   give `q`.
/// - `primality_rounds`: Miller-Rabin rounds per primality test.
/// - `interrupt`: Cancellation hook for the prime searches.
///
/// # Errors
/// - [`DrsaError::SeedTooShort`] if `seed` has fewer than 2 bytes.
/// - [`DrsaError::IdenticalPrimes`] if both halves lead to the same prime.
/// - [`DrsaError::NoModularInverse`] if `gcd(e, phi) != 1`.
/// - [`DrsaError::TrivialPrivateExponent`] / [`DrsaError::InverseCheckFailed`]
///   if the private exponent fails its checks.
/// - [`DrsaError::Interrupted`] if `interrupt` stops a prime search.
pub fn derive_rsa_with(
    seed: &[u8],
    primality_rounds: usize,
    interrupt: &mut dyn Interrupt,
) -> Result<RsaParameters, DrsaError> {
    if seed.len() < 2 {
        return Err(DrsaError::SeedTooShort { len: seed.len() });
    }

    let (first, second) = converter::split_halves(seed);
    let p = primes::next_prime(&converter::to_biguint(first), primality_rounds, interrupt)?;
    let q = primes::next_prime(&converter::to_biguint(second), primality_rounds, interrupt)?;
    let p = primes::sift_small_factors(p, primality_rounds, interrupt)?;
    let q = primes::sift_small_factors(q, primality_rounds, interrupt)?;

    let params = RsaParameters::from_primes(p, q)?;
    debug!(
        p_bits = params.p.bits(),
        q_bits = params.q.bits(),
        n_bits = params.n.bits(),
        "DRSA parameters derived"
    );
    Ok(params)
}

impl RsaParameters {
    /// Builds the parameters from two primes and the fixed public exponent.
    fn from_primes(p: BigUint, q: BigUint) -> Result<Self, DrsaError> {
        if p == q {
            warn!(bits = p.bits(), "DRSA rejected identical primes");
            return Err(DrsaError::IdenticalPrimes);
        }

        let one = BigUint::one();
        let n = &p * &q;
        let phi = (&p - &one) * (&q - &one);
        let e = BigUint::from(PUBLIC_EXPONENT);
        let d = match mod_inverse(&e, &phi) {
            Some(d) => d,
            None => {
                warn!("DRSA rejected primes with gcd(e, phi) != 1");
                return Err(DrsaError::NoModularInverse);
            }
        };

        let params = RsaParameters { n, e, d, p, q, phi };
        params.check_private_exponent()?;
        Ok(params)
    }

    /// Rebuilds parameters from the five conventional RSA integers, checking
    /// every invariant.
    ///
    /// # Errors
    /// - [`DrsaError::IdenticalPrimes`] if `p == q`.
    /// - [`DrsaError::InvalidComponents`] if `e` is not 65537, `n != p * q`
    ///   or a prime is not above 1.
    /// - [`DrsaError::TrivialPrivateExponent`] / [`DrsaError::InverseCheckFailed`]
    ///   if `d` is not a valid private exponent.
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<Self, DrsaError> {
        if p == q {
            return Err(DrsaError::IdenticalPrimes);
        }
        if e != BigUint::from(PUBLIC_EXPONENT) {
            return Err(DrsaError::InvalidComponents {
                details: format!("public exponent must be {}", PUBLIC_EXPONENT),
            });
        }
        if n != &p * &q {
            return Err(DrsaError::InvalidComponents {
                details: "modulus is not the product of p and q".to_string(),
            });
        }
        let one = BigUint::one();
        if p <= one || q <= one {
            return Err(DrsaError::InvalidComponents {
                details: "primes must be greater than 1".to_string(),
            });
        }
        let phi = (&p - &one) * (&q - &one);
        let params = RsaParameters { n, e, d, p, q, phi };
        params.check_private_exponent()?;
        Ok(params)
    }

    fn check_private_exponent(&self) -> Result<(), DrsaError> {
        if self.d.is_one() {
            warn!("DRSA rejected trivial private exponent");
            return Err(DrsaError::TrivialPrivateExponent);
        }
        if !((&self.e * &self.d) % &self.phi).is_one() {
            warn!("DRSA rejected private exponent failing the inverse check");
            return Err(DrsaError::InverseCheckFailed);
        }
        Ok(())
    }

    /// Public parameters `(n, e)`.
    pub fn public_params(&self) -> (&BigUint, &BigUint) {
        (&self.n, &self.e)
    }

    /// Private parameters `(n, e, d, p, q)`.
    pub fn private_params(&self) -> (&BigUint, &BigUint, &BigUint, &BigUint, &BigUint) {
        (&self.n, &self.e, &self.d, &self.p, &self.q)
    }

    /// Modulus.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Public exponent, always 65537.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Private exponent.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// First prime factor, derived from the first half of the seed.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Second prime factor, derived from the second half of the seed.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Euler totient `(p - 1)(q - 1)`.
    pub fn phi(&self) -> &BigUint {
        &self.phi
    }

    /// Bit length of the modulus.
    pub fn bits(&self) -> usize {
        self.n.bits()
    }

    /// Textbook RSA encryption, `message^e mod n`. No padding.
    pub fn encrypt_raw(&self, message: &BigUint) -> BigUint {
        message.modpow(&self.e, &self.n)
    }

    /// Textbook RSA decryption, `ciphertext^d mod n`. No padding.
    pub fn decrypt_raw(&self, ciphertext: &BigUint) -> BigUint {
        ciphertext.modpow(&self.d, &self.n)
    }

    /// Returns `true` if `message < n` survives an encrypt/decrypt round
    /// trip.
    pub fn check_round_trip(&self, message: &BigUint) -> bool {
        if message >= &self.n {
            return false;
        }
        self.decrypt_raw(&self.encrypt_raw(message)) == *message
    }
}

/// Inverse of `a` modulo `m` by the extended Euclidean algorithm.
///
/// Returns `None` when `gcd(a, m) != 1`.
fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let modulus = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut old_r = BigInt::from_biguint(Sign::Plus, a.clone());
    let mut r = modulus.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return None;
    }
    let mut inverse = old_s % &modulus;
    if inverse.sign() == Sign::Minus {
        inverse += &modulus;
    }
    inverse.to_biguint()
}
