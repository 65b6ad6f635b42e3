//! Bit-exact packing of coefficient arrays.
//!
//! Each coefficient contributes exactly `l` bits, least significant first,
//! packed contiguously. 256 coefficients at `l` bits occupy `32 * l` bytes,
//! so the bit width of a packed buffer can be recovered from its length.

use latkem_params::RING_N;

use crate::error::{validate, Error, Result};

/// Maximum supported per-coefficient bit width.
pub const MAX_BITS: usize = 12;

fn check_bits(l: usize) -> Result<()> {
    validate::parameter(
        (1..=MAX_BITS).contains(&l),
        "bits",
        "per-coefficient width must be in [1, 12]",
    )
}

/// Packs 256 coefficients at `l` bits each into `32 * l` bytes.
///
/// Coefficients must already fit in `l` bits; an oversized value would bleed
/// into its neighbor, so it is rejected instead.
pub fn pack_coeffs(coeffs: &[u32; RING_N], l: usize) -> Result<Vec<u8>> {
    check_bits(l)?;
    let mut out = vec![0u8; RING_N * l / 8];
    for (i, &c) in coeffs.iter().enumerate() {
        if c >> l != 0 {
            return Err(Error::Processing {
                operation: "coefficient packing",
                details: "coefficient does not fit in the requested bit width".into(),
            });
        }
        let mut bit = i * l;
        for j in 0..l {
            out[bit / 8] |= (((c >> j) & 1) as u8) << (bit % 8);
            bit += 1;
        }
    }
    Ok(out)
}

/// Packs at the smallest width that fits every coefficient.
///
/// Returns the chosen width alongside the bytes; useful when the width is a
/// property of the data rather than of the call site.
pub fn pack_coeffs_auto(coeffs: &[u32; RING_N]) -> Result<(Vec<u8>, usize)> {
    let max = coeffs.iter().copied().max().unwrap_or(0);
    let l = (32 - max.leading_zeros()).max(1) as usize;
    let bytes = pack_coeffs(coeffs, l)?;
    Ok((bytes, l))
}

/// Unpacks `32 * l` bytes into 256 coefficients of `l` bits each.
pub fn unpack_coeffs(bytes: &[u8], l: usize) -> Result<[u32; RING_N]> {
    check_bits(l)?;
    validate::length("packed coefficients", bytes.len(), RING_N * l / 8)?;

    let mut coeffs = [0u32; RING_N];
    for (i, c) in coeffs.iter_mut().enumerate() {
        let mut bit = i * l;
        for j in 0..l {
            *c |= (((bytes[bit / 8] >> (bit % 8)) & 1) as u32) << j;
            bit += 1;
        }
    }
    Ok(coeffs)
}

/// Recovers the per-coefficient bit width from a packed buffer length.
///
/// Valid lengths are exactly the multiples of 32 from 32 to 384 bytes.
pub fn infer_bits(len: usize) -> Result<usize> {
    let l = len / (RING_N / 8);
    if l == 0 || l > MAX_BITS || len != l * RING_N / 8 {
        return Err(Error::Parameter {
            name: "packed length".into(),
            reason: "length does not correspond to a whole bit width".into(),
        });
    }
    Ok(l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pack_length_tracks_bit_width() {
        let coeffs = [1u32; RING_N];
        for l in 1..=MAX_BITS {
            let bytes = pack_coeffs(&coeffs, l).unwrap();
            assert_eq!(bytes.len(), 32 * l);
            assert_eq!(infer_bits(bytes.len()).unwrap(), l);
        }
    }

    #[test]
    fn oversized_coefficient_rejected() {
        let mut coeffs = [0u32; RING_N];
        coeffs[17] = 1 << 4;
        assert!(pack_coeffs(&coeffs, 4).is_err());
        assert!(pack_coeffs(&coeffs, 5).is_ok());
    }

    #[test]
    fn unpack_validates_length() {
        assert!(matches!(
            unpack_coeffs(&[0u8; 100], 4),
            Err(Error::Length { .. })
        ));
        assert!(unpack_coeffs(&[0u8; 128], 4).is_ok());
    }

    #[test]
    fn bit_width_bounds() {
        let coeffs = [0u32; RING_N];
        assert!(pack_coeffs(&coeffs, 0).is_err());
        assert!(pack_coeffs(&coeffs, 13).is_err());
        assert!(infer_bits(0).is_err());
        assert!(infer_bits(33).is_err());
        assert!(infer_bits(32 * 13).is_err());
    }

    #[test]
    fn known_single_bit_layout() {
        let mut coeffs = [0u32; RING_N];
        coeffs[0] = 1;
        coeffs[7] = 1;
        coeffs[8] = 1;
        let bytes = pack_coeffs(&coeffs, 1).unwrap();
        assert_eq!(bytes[0], 0b1000_0001);
        assert_eq!(bytes[1], 0b0000_0001);
    }

    #[test]
    fn auto_width_picks_minimum() {
        let mut coeffs = [0u32; RING_N];
        coeffs[3] = 300;
        let (bytes, l) = pack_coeffs_auto(&coeffs).unwrap();
        assert_eq!(l, 9);
        assert_eq!(unpack_coeffs(&bytes, l).unwrap(), coeffs);

        let (_, l_zero) = pack_coeffs_auto(&[0u32; RING_N]).unwrap();
        assert_eq!(l_zero, 1);
    }

    proptest! {
        #[test]
        fn pack_unpack_roundtrip(
            raw in proptest::collection::vec(0u32..4096, RING_N),
            l in 1usize..=MAX_BITS,
        ) {
            let mask = (1u32 << l) - 1;
            let mut coeffs = [0u32; RING_N];
            for (dst, src) in coeffs.iter_mut().zip(&raw) {
                *dst = src & mask;
            }
            let bytes = pack_coeffs(&coeffs, l).unwrap();
            prop_assert_eq!(bytes.len(), 32 * l);
            prop_assert_eq!(unpack_coeffs(&bytes, l).unwrap(), coeffs);
        }
    }
}
