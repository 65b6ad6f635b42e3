//! Arbitrary-length message encryption over the fixed 32-byte KEM block.
//!
//! Messages are padded PKCS#7-style to a whole number of 32-byte blocks and
//! each block is encapsulated independently under fresh per-block coins. The
//! padding branch taken is reported as a [`PadMode`] tag that the caller
//! must present again on decrypt to select the matching unpadding strategy.

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use latkem_algorithms::hash::h256;
use latkem_params::{KemParams, MESSAGE_BYTES, SEED_BYTES};

use crate::error::{Error, Result};
use crate::kem::{decapsulate, encapsulate};
use crate::keys::{Ciphertext, PublicKey, SecretKey};

/// The KEM block size in bytes.
pub const BLOCK_BYTES: usize = MESSAGE_BYTES;

/// Which padding branch a message took, by length relative to the block
/// size. Transmitted alongside the ciphertext as a small integer tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadMode {
    /// Shorter than one block; a single padded block. The empty message
    /// takes this branch with a full block of padding.
    Short = 1,
    /// Exactly one block; sent as-is.
    Exact = 2,
    /// A multiple of the block size (more than one block); sent as-is.
    Aligned = 3,
    /// Longer than one block with a partial tail; the tail block is padded.
    Trailing = 4,
}

impl PadMode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PadMode {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(Self::Short),
            2 => Ok(Self::Exact),
            3 => Ok(Self::Aligned),
            4 => Ok(Self::Trailing),
            _ => Err(Error::Padding {
                reason: "unknown padding mode tag",
            }),
        }
    }
}

/// Pads a message to a whole number of blocks and reports the branch taken.
pub fn pad(message: &[u8]) -> (Vec<u8>, PadMode) {
    let rem = message.len() % BLOCK_BYTES;
    let mode = if message.len() < BLOCK_BYTES {
        PadMode::Short
    } else if message.len() == BLOCK_BYTES {
        PadMode::Exact
    } else if rem == 0 {
        PadMode::Aligned
    } else {
        PadMode::Trailing
    };

    let mut out = message.to_vec();
    if matches!(mode, PadMode::Short | PadMode::Trailing) {
        let fill = BLOCK_BYTES - rem;
        out.extend(std::iter::repeat(fill as u8).take(fill));
    }
    (out, mode)
}

/// Strips padding according to the branch tag.
///
/// Pad validation runs in constant time over the final block before any
/// accept/reject branch.
pub fn unpad(padded: &[u8], mode: PadMode) -> Result<Vec<u8>> {
    if padded.is_empty() || padded.len() % BLOCK_BYTES != 0 {
        return Err(Error::Padding {
            reason: "padded length is not a whole number of blocks",
        });
    }
    match mode {
        PadMode::Exact | PadMode::Aligned => Ok(padded.to_vec()),
        PadMode::Short | PadMode::Trailing => {
            let tail = &padded[padded.len() - BLOCK_BYTES..];
            let count = tail[BLOCK_BYTES - 1];

            let mut valid = Choice::from(u8::from(count >= 1));
            valid &= Choice::from(u8::from(count as usize <= BLOCK_BYTES));
            for (i, &b) in tail.iter().enumerate() {
                let in_pad =
                    Choice::from(u8::from(i + count as usize >= BLOCK_BYTES));
                valid &= !in_pad | b.ct_eq(&count);
            }

            if valid.unwrap_u8() == 0 {
                return Err(Error::Padding {
                    reason: "pad bytes do not match the pad count",
                });
            }
            Ok(padded[..padded.len() - count as usize].to_vec())
        }
    }
}

/// Derives independent coins for block `index` from a base seed.
fn block_coins(base: &[u8; SEED_BYTES], index: u8) -> [u8; SEED_BYTES] {
    let mut input = [0u8; SEED_BYTES + 1];
    input[..SEED_BYTES].copy_from_slice(base);
    input[SEED_BYTES] = index;
    let out = h256(&input);
    input.zeroize();
    out
}

/// Encrypts a message of any length, one independent encapsulation per
/// padded block. Per-block coins are derived from the base seed and the
/// block index, so no two blocks share coins.
pub fn encrypt_message(
    params: &KemParams,
    pk: &PublicKey,
    message: &[u8],
    coins: &[u8; SEED_BYTES],
) -> Result<(Vec<u8>, PadMode)> {
    let (padded, mode) = pad(message);
    let blocks = padded.len() / BLOCK_BYTES;
    if blocks > u8::MAX as usize + 1 {
        return Err(Error::params("message exceeds the maximum block count"));
    }

    let mut out = Vec::with_capacity(blocks * params.ciphertext_size());
    for (index, block) in padded.chunks_exact(BLOCK_BYTES).enumerate() {
        let mut m = [0u8; MESSAGE_BYTES];
        m.copy_from_slice(block);
        let per_block = block_coins(coins, index as u8);
        let ct = encapsulate(params, pk, &m, &per_block)?;
        out.extend_from_slice(ct.as_bytes());
    }
    Ok((out, mode))
}

/// Decrypts a multi-block ciphertext and strips padding per the mode tag.
pub fn decrypt_message(
    params: &KemParams,
    sk: &SecretKey,
    ciphertext: &[u8],
    mode: PadMode,
) -> Result<Vec<u8>> {
    let block_ct = params.ciphertext_size();
    if ciphertext.is_empty() || ciphertext.len() % block_ct != 0 {
        return Err(Error::InvalidCiphertext {
            expected: block_ct,
            actual: ciphertext.len(),
        });
    }

    let mut padded = Vec::with_capacity(ciphertext.len() / block_ct * BLOCK_BYTES);
    for chunk in ciphertext.chunks_exact(block_ct) {
        let ct = Ciphertext::new(chunk.to_vec());
        padded.extend_from_slice(&decapsulate(params, sk, &ct)?);
    }
    unpad(&padded, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_branches() {
        assert_eq!(pad(&[]).1, PadMode::Short);
        assert_eq!(pad(&[0u8; 17]).1, PadMode::Short);
        assert_eq!(pad(&[0u8; 32]).1, PadMode::Exact);
        assert_eq!(pad(&[0u8; 64]).1, PadMode::Aligned);
        assert_eq!(pad(&[0u8; 70]).1, PadMode::Trailing);
    }

    #[test]
    fn pad_lengths_are_whole_blocks() {
        for len in [0usize, 1, 17, 31, 32, 33, 64, 70, 96] {
            let (padded, _) = pad(&vec![0xaa; len]);
            assert_eq!(padded.len() % BLOCK_BYTES, 0);
            assert!(!padded.is_empty() || len > 0, "empty message still pads");
            assert!(padded.len() >= len);
        }
        // The empty message becomes one full pad block.
        assert_eq!(pad(&[]).0, vec![32u8; 32]);
    }

    #[test]
    fn pad_unpad_roundtrip() {
        for len in [0usize, 17, 32, 64, 70] {
            let msg: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let (padded, mode) = pad(&msg);
            assert_eq!(unpad(&padded, mode).unwrap(), msg, "length {}", len);
        }
    }

    #[test]
    fn corrupted_pad_rejected() {
        let (mut padded, mode) = pad(&[1u8; 17]);
        assert_eq!(mode, PadMode::Short);
        // Flip one pad byte without touching the count byte.
        padded[20] ^= 1;
        assert!(matches!(
            unpad(&padded, mode),
            Err(Error::Padding { .. })
        ));
    }

    #[test]
    fn zero_count_rejected() {
        let mut block = vec![0u8; 32];
        block[31] = 0;
        assert!(unpad(&block, PadMode::Short).is_err());
    }

    #[test]
    fn mode_tag_roundtrip() {
        for mode in [
            PadMode::Short,
            PadMode::Exact,
            PadMode::Aligned,
            PadMode::Trailing,
        ] {
            assert_eq!(PadMode::try_from(mode.as_u8()).unwrap(), mode);
        }
        assert!(PadMode::try_from(0).is_err());
        assert!(PadMode::try_from(5).is_err());
    }

    #[test]
    fn block_coins_are_distinct_per_index() {
        let base = [7u8; SEED_BYTES];
        assert_ne!(block_coins(&base, 0), block_coins(&base, 1));
        assert_eq!(block_coins(&base, 3), block_coins(&base, 3));
    }
}
