//! Algorithmic core of the latkem key encapsulation mechanism.
//!
//! This crate provides the pieces the KEM pipeline is composed from:
//!
//! - [`field`]: modular integer helpers (primality, primitive-root search,
//!   bit reversal)
//! - [`ntt`]: a generic number-theoretic transform engine over a runtime
//!   modulus
//! - [`poly`]: ring elements of `Z_q[x]/(x^256 + 1)` with compile-time
//!   domain tagging, plus vectors and matrices of them
//! - [`sample`]: uniform rejection sampling and centered binomial sampling
//! - [`serialize`]: bit-exact coefficient packing and unpacking
//! - [`compress`]: lossy coefficient compression used to shrink ciphertexts
//! - [`hash`]: thin wrappers over the SHA-3 family collaborators

pub mod compress;
pub mod error;
pub mod field;
pub mod hash;
pub mod ntt;
pub mod poly;
pub mod sample;
pub mod serialize;

pub use error::{Error, Result};
