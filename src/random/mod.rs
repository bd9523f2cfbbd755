//! Deterministic byte generation subsystem.
//!
//! Provides the PBKDF2/SHA-256 seed material, the XorShift register, the
//! rotating window and the PRBG that ties them together through the setup
//! procedure.

pub mod byte_source;
pub mod prbg;
pub mod seed;
pub mod window;
pub mod xorshift;
