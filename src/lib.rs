//! Deterministic RSA key derivation from textual inputs.
//!
//! The same `(password, confusion string, iteration count)` triple always
//! yields the same byte stream and the same RSA key pair, so a key can be
//! regenerated anywhere from the inputs alone instead of being stored.
//!
//! # Architecture
//!
//! ```text
//! seed        (PBKDF2-HMAC-SHA1 seed block + SHA-256 confusion pattern)
//!     ↓
//! XorShift    (signed 64-bit register, one byte per step)
//!     ↓ setup: reseed every time the rotating window matches the pattern
//! Prbg        (stream of deterministic bytes)
//!     ↓ seed_len bytes
//! DRSA        (next_prime on both halves + small-prime sieve, e = 65537)
//!     ↓
//! RsaParameters
//! ```
//!
//! Every unbounded stage polls an [`Interrupt`](interrupt::Interrupt), so a
//! derivation can be bounded by a deadline, a cancellation flag or a step
//! budget.
//!
//! # Examples
//!
//! Draw bytes from a set-up generator:
//!
//! ```
//! use drsa::Prbg;
//!
//! let mut prbg = Prbg::new("password", "x", 1).unwrap();
//! prbg.setup().unwrap();
//!
//! let bytes: Vec<u8> = (0..4).map(|_| prbg.next_byte()).collect();
//! assert_eq!(bytes, vec![241, 229, 214, 165]);
//! ```
//!
//! Derive RSA parameters from an explicit seed:
//!
//! ```
//! use drsa::derive_rsa;
//! use num_bigint_dig::BigUint;
//!
//! let params = derive_rsa(&[0x10, 0x00, 0x20, 0x00]).unwrap();
//! assert_eq!(params.p(), &BigUint::from(4099u32));
//! assert_eq!(params.q(), &BigUint::from(8209u32));
//! ```
//!
//! Run the whole pipeline with a deadline:
//!
//! ```
//! use std::time::Duration;
//! use drsa::interrupt::Watchdog;
//! use drsa::{DrsaConfig, KeyGenerator};
//! use num_bigint_dig::BigUint;
//!
//! let generator = KeyGenerator::with_config(DrsaConfig::new().with_seed_len(64).unwrap());
//! let mut watchdog = Watchdog::new().with_timeout(Duration::from_secs(60));
//!
//! let params = generator.derive_with("password", "x", 1, &mut watchdog).unwrap();
//! assert_eq!(params.e(), &BigUint::from(65537u32));
//! ```

#![deny(clippy::all)]

pub mod config;
pub mod drsa;
pub mod error;
pub mod interrupt;
pub mod keygen;
pub mod primes;
pub mod random;
pub mod utils;

#[cfg(feature = "pkcs1")]
pub mod pkcs1;

pub use config::DrsaConfig;
pub use drsa::{derive_rsa, derive_rsa_with, RsaParameters, PUBLIC_EXPONENT};
pub use error::DrsaError;
pub use keygen::KeyGenerator;
pub use random::prbg::Prbg;
