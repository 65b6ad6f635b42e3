//! Number-theoretic transform engine over a runtime-configured prime field.
//!
//! The engine is parameterized by a transform length `n` (a power of two) and
//! a prime modulus `q` admitting a primitive `2n`-th root of unity `phi`; the
//! root requirement makes the transform negacyclic, so pointwise products
//! correspond to convolution in `Z_q[x]/(x^n + 1)`. Twiddle factors
//! `phi^bitrev(m + i, n)` are derived on the fly rather than from
//! precomputed tables.
//!
//! Ordering convention: [`NttEngine::forward`] expects natural coefficient
//! order and emits bit-reversed order; [`NttEngine::inverse`] is the exact
//! converse and folds in the final multiplication by `n^-1`.

use crate::error::{validate, Error, Result};
use crate::field::{bit_rev, is_power_of_two, pow_mod, primitive_root};

/// A forward/inverse NTT over `Z_q` for one fixed `(n, q)` configuration.
#[derive(Debug, Clone)]
pub struct NttEngine {
    n: usize,
    q: u32,
    phi: u32,
    phi_inv: u32,
    n_inv: u32,
}

impl NttEngine {
    /// Builds an engine for length `n` and modulus `q`.
    ///
    /// Fails fast when `n` is not a power of two, `q` is not prime, or no
    /// primitive `2n`-th root of unity exists; no transform work happens on
    /// an invalid configuration.
    pub fn new(n: usize, q: u32) -> Result<Self> {
        if !is_power_of_two(n) {
            return Err(Error::param(
                "NttEngine",
                "transform length must be a power of two",
            ));
        }
        if n > (u32::MAX / 2) as usize {
            return Err(Error::param("NttEngine", "transform length too large"));
        }
        let phi = primitive_root(2 * n as u32, q)?;
        Ok(Self::with_root(n, q, phi))
    }

    /// Builds an engine from a known-good primitive `2n`-th root.
    ///
    /// Callers are responsible for the root being valid; the public entry
    /// point is [`NttEngine::new`].
    pub(crate) fn with_root(n: usize, q: u32, phi: u32) -> Self {
        let phi_inv = pow_mod(phi as u64, 2 * n as u64 - 1, q as u64) as u32;
        let n_inv = pow_mod(n as u64, q as u64 - 2, q as u64) as u32;
        Self {
            n,
            q,
            phi,
            phi_inv,
            n_inv,
        }
    }

    /// The transform length `n`.
    pub fn size(&self) -> usize {
        self.n
    }

    /// The field modulus `q`.
    pub fn modulus(&self) -> u32 {
        self.q
    }

    /// The primitive `2n`-th root of unity the engine was configured with.
    pub fn root(&self) -> u32 {
        self.phi
    }

    /// Forward transform: natural order in, bit-reversed order out.
    ///
    /// Coefficients must be reduced to `[0, q)`; the output stays reduced.
    pub fn forward(&self, a: &mut [u32]) -> Result<()> {
        validate::length("NTT input", a.len(), self.n)?;
        let n = self.n;
        let q = self.q as u64;

        let mut m = 1usize;
        let mut half = n / 2;
        while m < n {
            for i in 0..m {
                let j1 = 2 * i * half;
                let s = pow_mod(self.phi as u64, bit_rev(m + i, n) as u64, q);
                for j in j1..j1 + half {
                    // Cooley-Tukey butterfly
                    let u = a[j] as u64;
                    let v = a[j + half] as u64 * s % q;
                    a[j] = ((u + v) % q) as u32;
                    a[j + half] = ((u + q - v) % q) as u32;
                }
            }
            m *= 2;
            half /= 2;
        }
        Ok(())
    }

    /// Inverse transform: bit-reversed order in, natural order out.
    ///
    /// The final pass multiplies every coefficient by `n^-1 mod q`.
    pub fn inverse(&self, a: &mut [u32]) -> Result<()> {
        validate::length("inverse NTT input", a.len(), self.n)?;
        let n = self.n;
        let q = self.q as u64;

        let mut m = n / 2;
        let mut half = 1usize;
        while m >= 1 {
            for i in 0..m {
                let j1 = 2 * i * half;
                let s = pow_mod(self.phi_inv as u64, bit_rev(m + i, n) as u64, q);
                for j in j1..j1 + half {
                    // Gentleman-Sande butterfly: twiddle after the subtraction
                    let u = a[j] as u64;
                    let v = a[j + half] as u64;
                    a[j] = ((u + v) % q) as u32;
                    a[j + half] = ((u + q - v) % q * s % q) as u32;
                }
            }
            m /= 2;
            half *= 2;
        }

        for c in a.iter_mut() {
            *c = (*c as u64 * self.n_inv as u64 % q) as u32;
        }
        Ok(())
    }
}
