//! latkem: a Kyber-style lattice key encapsulation mechanism built on a
//! generic number-theoretic transform engine.
//!
//! This facade re-exports the workspace crates:
//!
//! - [`params`]: parameter-set definitions and derived sizes
//! - [`algorithms`]: the transform engine, ring arithmetic, sampling,
//!   serialization and compression primitives
//! - [`kem`]: key generation, encapsulation, decapsulation and the
//!   block encryption layer
//!
//! # Example
//!
//! ```
//! use latkem::kem::{decapsulate, encapsulate_with_rng, keygen};
//! use latkem::params::KEM_512;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let (pk, sk) = keygen(&KEM_512, &mut rng)?;
//!
//! let message = [0x42u8; 32];
//! let ct = encapsulate_with_rng(&KEM_512, &pk, &message, &mut rng)?;
//! assert_eq!(decapsulate(&KEM_512, &sk, &ct)?, message);
//! # Ok::<(), latkem::kem::Error>(())
//! ```

pub use latkem_algorithms as algorithms;
pub use latkem_kem as kem;
pub use latkem_params as params;

/// Commonly used items in one import.
pub mod prelude {
    pub use crate::kem::{
        decapsulate, decrypt_message, encapsulate, encapsulate_with_rng, encrypt_message,
        keygen, keygen_deterministic, Ciphertext, PadMode, PublicKey, SecretKey,
    };
    pub use crate::params::{KemParams, KEM_1024, KEM_512, KEM_768};
}

// Re-exported for downstream callers that need the same RNG traits.
pub use rand;
pub use zeroize;
