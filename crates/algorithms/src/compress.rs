//! Lossy coefficient compression to `d`-bit precision.
//!
//! Compression maps `[0, q)` onto `[0, 2^d)` with round-half-up; since `q`
//! is odd the scaled value is never exactly halfway, so the integer form
//! `((x << d) + q/2) / q` is exact. Decompression scales back with ties
//! rounded up. The round trip is not the identity; its error is bounded by
//! `round(q / 2^(d+1))` in ring distance.

use latkem_params::{RING_N, RING_Q};

use crate::error::{validate, Result};
use crate::poly::Poly;

fn check_precision(d: usize) -> Result<()> {
    validate::parameter(
        (1..=11).contains(&d),
        "precision",
        "compression precision must be in [1, 11]",
    )
}

/// Compresses one coefficient to `d` bits.
pub fn compress_coeff(x: u32, d: usize) -> u32 {
    let scaled = ((x as u64) << d) + (RING_Q as u64) / 2;
    ((scaled / RING_Q as u64) as u32) & ((1 << d) - 1)
}

/// Decompresses one `d`-bit value back into `[0, q)`.
pub fn decompress_coeff(x: u32, d: usize) -> u32 {
    ((x as u64 * RING_Q as u64 + (1u64 << (d - 1))) >> d) as u32
}

/// Compresses every coefficient of a polynomial to `d` bits.
pub fn compress_poly(p: &Poly, d: usize) -> Result<[u32; RING_N]> {
    check_precision(d)?;
    let mut out = [0u32; RING_N];
    for (dst, &src) in out.iter_mut().zip(p.coeffs()) {
        *dst = compress_coeff(src, d);
    }
    Ok(out)
}

/// Rebuilds a polynomial from `d`-bit compressed coefficients.
pub fn decompress_poly(coeffs: &[u32; RING_N], d: usize) -> Result<Poly> {
    check_precision(d)?;
    let mut out = [0u32; RING_N];
    for (dst, &src) in out.iter_mut().zip(coeffs) {
        *dst = decompress_coeff(src, d);
    }
    Poly::from_coeffs(&out)
}
