//! Hash and XOF collaborators.
//!
//! All symmetric primitives come from the `sha3` crate; this module only
//! fixes the domain-separation conventions: single-byte index suffixes on
//! the XOF seed and a single-byte nonce suffix on the PRF key.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake128Reader, Shake256};

use latkem_params::SEED_BYTES;

/// 32-byte hash of arbitrary input.
pub fn h256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha3_256::digest(data));
    out
}

/// 64-byte hash, returned as two 32-byte halves.
pub fn g512(data: &[u8]) -> ([u8; 32], [u8; 32]) {
    let digest = Sha3_512::digest(data);
    let mut lo = [0u8; 32];
    let mut hi = [0u8; 32];
    lo.copy_from_slice(&digest[..32]);
    hi.copy_from_slice(&digest[32..]);
    (lo, hi)
}

/// Streaming XOF keyed by a 32-byte seed and two index bytes.
///
/// The indices select a matrix cell; swapping them yields the transposed
/// matrix without re-deriving the seed.
pub fn xof(seed: &[u8; SEED_BYTES], i: u8, j: u8) -> Shake128Reader {
    let mut hasher = Shake128::default();
    hasher.update(seed);
    hasher.update(&[i, j]);
    hasher.finalize_xof()
}

/// Fixed-length pseudorandom output keyed by a 32-byte seed and a one-byte
/// nonce counter.
pub fn prf(seed: &[u8; SEED_BYTES], nonce: u8, len: usize) -> Vec<u8> {
    let mut hasher = Shake256::default();
    hasher.update(seed);
    hasher.update(&[nonce]);
    let mut out = vec![0u8; len];
    hasher.finalize_xof().read(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h256_known_length_and_determinism() {
        let a = h256(b"abc");
        let b = h256(b"abc");
        assert_eq!(a, b);
        assert_ne!(a, h256(b"abd"));
    }

    #[test]
    fn g512_splits_one_digest() {
        let (lo, hi) = g512(b"seed material");
        assert_ne!(lo, hi);
        let (lo2, hi2) = g512(b"seed material");
        assert_eq!(lo, lo2);
        assert_eq!(hi, hi2);
    }

    #[test]
    fn xof_indices_separate_streams() {
        let seed = [7u8; SEED_BYTES];
        let mut a = [0u8; 64];
        let mut b = [0u8; 64];
        let mut c = [0u8; 64];
        xof(&seed, 0, 1).read(&mut a);
        xof(&seed, 1, 0).read(&mut b);
        xof(&seed, 0, 1).read(&mut c);
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn xof_streaming_is_prefix_consistent() {
        let seed = [9u8; SEED_BYTES];
        let mut whole = [0u8; 96];
        xof(&seed, 2, 3).read(&mut whole);

        let mut reader = xof(&seed, 2, 3);
        let mut first = [0u8; 32];
        let mut rest = [0u8; 64];
        reader.read(&mut first);
        reader.read(&mut rest);
        assert_eq!(&whole[..32], &first);
        assert_eq!(&whole[32..], &rest);
    }

    #[test]
    fn prf_nonce_separates_outputs() {
        let seed = [3u8; SEED_BYTES];
        let a = prf(&seed, 0, 192);
        let b = prf(&seed, 1, 192);
        assert_eq!(a.len(), 192);
        assert_ne!(a, b);
        assert_eq!(a, prf(&seed, 0, 192));
    }
}
