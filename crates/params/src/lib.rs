//! Parameter sets for the latkem key encapsulation mechanism.
//!
//! A [`KemParams`] value carries every scheme parameter explicitly, so several
//! parameter sets can be active at the same time; callers thread a reference
//! through key generation, encryption, and decryption rather than relying on
//! module-level constants.

/// Polynomial degree of the working ring `Z_q[x]/(x^256 + 1)`.
pub const RING_N: usize = 256;

/// Coefficient modulus of the working ring.
pub const RING_Q: u32 = 3329;

/// Bits per coefficient when packing uncompressed key material.
pub const KEY_PACK_BITS: usize = 12;

/// Seed size in bytes (matrix seed `rho`, noise seeds, coins, messages).
pub const SEED_BYTES: usize = 32;

/// Plaintext block size in bytes handled by a single KEM operation.
pub const MESSAGE_BYTES: usize = 32;

/// Scheme parameters for one security level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KemParams {
    /// Module dimension k (vectors are k ring elements, matrices k x k).
    pub k: usize,

    /// Noise width for the secret vector `s` and error vector `e`.
    pub eta1: u8,

    /// Noise width for the encryption errors `e1` and `e2`.
    pub eta2: u8,

    /// Compression bits for the ciphertext vector `u`.
    pub du: usize,

    /// Compression bits for the ciphertext polynomial `v`.
    pub dv: usize,
}

/// Level-1 parameter set (k = 2), analogous to Kyber-512.
pub const KEM_512: KemParams = KemParams {
    k: 2,
    eta1: 3,
    eta2: 2,
    du: 10,
    dv: 4,
};

/// Level-3 parameter set (k = 3), analogous to Kyber-768.
pub const KEM_768: KemParams = KemParams {
    k: 3,
    eta1: 2,
    eta2: 2,
    du: 10,
    dv: 4,
};

/// Level-5 parameter set (k = 4), analogous to Kyber-1024.
pub const KEM_1024: KemParams = KemParams {
    k: 4,
    eta1: 2,
    eta2: 2,
    du: 11,
    dv: 5,
};

impl KemParams {
    /// Public key size in bytes: the 12-bit-packed vector `t` plus `rho`.
    pub const fn public_key_size(&self) -> usize {
        self.k * RING_N * KEY_PACK_BITS / 8 + SEED_BYTES
    }

    /// Secret key size in bytes: the 12-bit-packed vector `s`.
    pub const fn secret_key_size(&self) -> usize {
        self.k * RING_N * KEY_PACK_BITS / 8
    }

    /// Ciphertext size in bytes: compressed `u` followed by compressed `v`.
    pub const fn ciphertext_size(&self) -> usize {
        (self.du * self.k * RING_N + self.dv * RING_N) / 8
    }

    /// Byte offset of the `v` part inside a ciphertext.
    pub const fn ciphertext_u_size(&self) -> usize {
        self.du * self.k * RING_N / 8
    }

    /// Checks the parameter shape before any cryptographic work.
    ///
    /// The dimension must fit in the single XOF domain-separation byte, the
    /// compression depths must stay strictly below the 12-bit packing width,
    /// and the noise widths must be usable by the centered binomial sampler.
    pub fn validate(&self) -> Result<(), &'static str> {
        // The PRF nonce counter reaches 2k and must fit in one byte.
        if self.k == 0 || self.k > 127 {
            return Err("dimension k must be in [1, 127]");
        }
        if self.du == 0 || self.du >= KEY_PACK_BITS {
            return Err("compression depth du must be in [1, 11]");
        }
        if self.dv == 0 || self.dv >= KEY_PACK_BITS {
            return Err("compression depth dv must be in [1, 11]");
        }
        if self.eta1 == 0 || self.eta1 > 16 || self.eta2 == 0 || self.eta2 > 16 {
            return Err("noise width eta must be in [1, 16]");
        }
        Ok(())
    }
}
