//! Lattice key encapsulation over `Z_3329[x]/(x^256 + 1)`.
//!
//! The module key-exchange core lives in [`kem`]: deterministic key
//! generation, encapsulation of 32-byte messages under explicit coins, and
//! probabilistic decapsulation. [`block`] extends the 32-byte block to
//! arbitrary-length messages with PKCS#7-style padding and one independent
//! encapsulation per block. Parameter sets are plain values from
//! `latkem_params` and travel explicitly through every call.

pub mod block;
pub mod error;
pub mod kem;
pub mod keys;
pub mod serialize;


pub use block::{decrypt_message, encrypt_message, pad, unpad, PadMode, BLOCK_BYTES};
pub use error::{Error, Result};
pub use kem::{
    decapsulate, encapsulate, encapsulate_with_rng, keygen, keygen_deterministic,
};
pub use keys::{Ciphertext, PublicKey, SecretKey};
