//! Coefficient sampling: uniform rejection sampling from an XOF stream and
//! centered binomial noise from PRF output.

use sha3::digest::XofReader;

use latkem_params::{RING_N, RING_Q};

use crate::error::{validate, Result};
use crate::poly::{NttPoly, Poly};

/// Bytes consumed from the XOF per refill while rejection sampling.
///
/// Three bytes yield two 12-bit candidates, so one block covers the common
/// case of filling all 256 coefficients without a second request.
const PARSE_BLOCK: usize = 3 * RING_N;

/// Rejection-samples a uniform transform-domain element from an XOF stream.
///
/// Each 3-byte group packs two 12-bit candidates; candidates at or above `q`
/// are discarded. The stream is extended on demand until all 256 positions
/// are filled, so the output is always uniform regardless of the rejection
/// rate.
pub fn uniform(reader: &mut impl XofReader) -> NttPoly {
    let mut coeffs = [0u32; RING_N];
    let mut filled = 0;
    let mut buf = [0u8; PARSE_BLOCK];
    while filled < RING_N {
        reader.read(&mut buf);
        for group in buf.chunks_exact(3) {
            let b0 = group[0] as u32;
            let b1 = group[1] as u32;
            let b2 = group[2] as u32;
            let d1 = b0 + 256 * (b1 % 16);
            let d2 = b1 / 16 + 16 * b2;
            if d1 < RING_Q && filled < RING_N {
                coeffs[filled] = d1;
                filled += 1;
            }
            if d2 < RING_Q && filled < RING_N {
                coeffs[filled] = d2;
                filled += 1;
            }
            if filled == RING_N {
                break;
            }
        }
    }
    NttPoly::from_raw(coeffs)
}

/// Samples a noise polynomial from the centered binomial distribution with
/// parameter `eta`.
///
/// Consumes exactly `64 * eta` bytes: `2 * eta` bits per coefficient, split
/// into two `eta`-bit groups whose popcount difference gives a value in
/// `[-eta, eta]`, lifted to `[0, q)`. Bits are taken least significant
/// first.
pub fn cbd(bytes: &[u8], eta: usize) -> Result<Poly> {
    validate::parameter(
        (1..=16).contains(&eta),
        "eta",
        "centered binomial parameter must be in [1, 16]",
    )?;
    validate::length("centered binomial input", bytes.len(), 64 * eta)?;

    let bit = |idx: usize| -> u32 { ((bytes[idx / 8] >> (idx % 8)) & 1) as u32 };

    let mut p = Poly::zero();
    for (i, c) in p.coeffs_mut().iter_mut().enumerate() {
        let base = 2 * i * eta;
        let mut a = 0u32;
        let mut b = 0u32;
        for j in 0..eta {
            a += bit(base + j);
            b += bit(base + eta + j);
        }
        *c = (a + RING_Q - b) % RING_Q;
    }
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::hash::{prf, xof};
    use latkem_params::SEED_BYTES;

    fn centered(c: u32) -> i32 {
        if c > RING_Q / 2 {
            c as i32 - RING_Q as i32
        } else {
            c as i32
        }
    }

    #[test]
    fn uniform_coefficients_in_range_and_deterministic() {
        let seed = [1u8; SEED_BYTES];
        let a = uniform(&mut xof(&seed, 0, 0));
        let b = uniform(&mut xof(&seed, 0, 0));
        assert_eq!(a, b);
        assert!(a.coeffs().iter().all(|&c| c < RING_Q));

        let other = uniform(&mut xof(&seed, 0, 1));
        assert_ne!(a, other);
    }

    #[test]
    fn uniform_fills_under_heavy_rejection() {
        // An all-0xff prefix decodes to candidates of 4095, all rejected,
        // forcing the sampler to request a second block.
        struct Prefixed {
            pos: usize,
        }
        impl XofReader for Prefixed {
            fn read(&mut self, buf: &mut [u8]) {
                for b in buf.iter_mut() {
                    *b = if self.pos < 3 * RING_N { 0xff } else { 0x01 };
                    self.pos += 1;
                }
            }
        }
        let p = uniform(&mut Prefixed { pos: 0 });
        assert!(p.coeffs().iter().all(|&c| c < RING_Q));
        // Bytes (1, 1, 1) decode to d1 = 257, d2 = 16.
        assert_eq!(p.coeffs()[0], 257);
        assert_eq!(p.coeffs()[1], 16);
    }

    #[test]
    fn cbd_values_stay_centered() {
        let seed = [5u8; SEED_BYTES];
        for eta in [2usize, 3] {
            let p = cbd(&prf(&seed, eta as u8, 64 * eta), eta).unwrap();
            for &c in p.coeffs() {
                let v = centered(c);
                assert!(v.abs() <= eta as i32, "coefficient {} out of range", v);
            }
        }
    }

    #[test]
    fn cbd_empirical_moments() {
        let seed = [8u8; SEED_BYTES];
        let mut sum = 0i64;
        let mut sum_sq = 0i64;
        let mut n = 0i64;
        for nonce in 0..32u8 {
            let p = cbd(&prf(&seed, nonce, 128), 2).unwrap();
            for &c in p.coeffs() {
                let v = centered(c) as i64;
                sum += v;
                sum_sq += v * v;
                n += 1;
            }
        }
        // 8192 draws from a distribution with mean 0 and variance eta/2 = 1.
        let mean = sum as f64 / n as f64;
        let variance = sum_sq as f64 / n as f64 - mean * mean;
        assert!(mean.abs() < 0.1, "empirical mean {}", mean);
        assert!(
            (variance - 1.0).abs() < 0.15,
            "empirical variance {}",
            variance
        );
    }

    #[test]
    fn cbd_length_must_be_exact() {
        assert!(matches!(
            cbd(&[0u8; 127], 2),
            Err(Error::Length { .. })
        ));
        assert!(matches!(
            cbd(&[0u8; 129], 2),
            Err(Error::Length { .. })
        ));
        assert!(cbd(&[0u8; 128], 2).is_ok());
    }

    #[test]
    fn cbd_eta_bounds() {
        assert!(matches!(cbd(&[], 0), Err(Error::Parameter { .. })));
        assert!(matches!(
            cbd(&[0u8; 64 * 17], 17),
            Err(Error::Parameter { .. })
        ));
        assert!(cbd(&[0u8; 64], 1).is_ok());
        assert!(cbd(&[0u8; 64 * 16], 16).is_ok());
    }

    #[test]
    fn cbd_all_zero_bytes_give_zero_polynomial() {
        let p = cbd(&[0u8; 128], 2).unwrap();
        assert_eq!(p, Poly::zero());
    }
}
