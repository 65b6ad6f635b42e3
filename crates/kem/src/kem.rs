//! The three KEM entry points: key generation, encapsulation and
//! decapsulation.
//!
//! All scheme parameters travel in an explicit [`KemParams`] value, so
//! multiple parameter sets can be active in one process. Each entry point is
//! a pure function of its inputs; encapsulation takes an explicit 32-byte
//! coin seed, and the `_with_rng` variants draw seeds from a caller-supplied
//! RNG and delegate to the deterministic forms.
//!
//! Noise sampling advances a single nonce counter in a fixed order: the `k`
//! elements of `s`, then `e` at key generation; the `k` elements of `r`,
//! then `e1`, then the scalar `e2` at encapsulation. Both parties must
//! derive matching noise from matching seeds, so the order is part of the
//! wire contract.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use latkem_algorithms::hash::{g512, prf, xof};
use latkem_algorithms::poly::{NttMatrix, NttPolyVec, Poly, PolyVec};
use latkem_algorithms::{compress, sample, serialize};
use latkem_params::{KemParams, MESSAGE_BYTES, SEED_BYTES};

use crate::error::{Error, Result};
use crate::keys::{Ciphertext, PublicKey, SecretKey};
use crate::serialize::{
    pack_ciphertext, pack_public_key, pack_secret_key, unpack_ciphertext, unpack_public_key,
    unpack_secret_key,
};

fn checked(params: &KemParams) -> Result<()> {
    params.validate().map_err(Error::params)
}

/// Expands the public matrix from its seed, one XOF stream per cell.
///
/// The two index bytes select the cell; `transposed` swaps them, so the
/// transpose is derived directly rather than materialized and flipped.
fn matrix_from_seed(
    rho: &[u8; SEED_BYTES],
    k: usize,
    transposed: bool,
) -> Result<NttMatrix> {
    let mut rows = Vec::with_capacity(k);
    for i in 0..k {
        let mut row = Vec::with_capacity(k);
        for j in 0..k {
            let (a, b) = if transposed {
                (i as u8, j as u8)
            } else {
                (j as u8, i as u8)
            };
            row.push(sample::uniform(&mut xof(rho, a, b)));
        }
        rows.push(NttPolyVec::from_polys(row));
    }
    NttMatrix::from_rows(rows).map_err(Error::from)
}

/// Samples `k` noise polynomials, advancing the nonce counter by one per
/// element.
fn sample_noise_vec(
    seed: &[u8; SEED_BYTES],
    nonce: &mut u8,
    k: usize,
    eta: u8,
) -> Result<PolyVec> {
    let eta = eta as usize;
    let mut polys = Vec::with_capacity(k);
    for _ in 0..k {
        polys.push(sample::cbd(&prf(seed, *nonce, 64 * eta), eta)?);
        *nonce += 1;
    }
    Ok(PolyVec::from_polys(polys))
}

/// Deterministic key generation from a 32-byte seed.
pub fn keygen_deterministic(
    params: &KemParams,
    d: &[u8; SEED_BYTES],
) -> Result<(PublicKey, SecretKey)> {
    checked(params)?;

    let (rho, mut sigma) = g512(d);
    let a = matrix_from_seed(&rho, params.k, false)?;

    let mut nonce = 0u8;
    let mut s = sample_noise_vec(&sigma, &mut nonce, params.k, params.eta1)?;
    let mut e = sample_noise_vec(&sigma, &mut nonce, params.k, params.eta1)?;
    sigma.zeroize();

    let s_hat = s.ntt()?;
    let e_hat = e.ntt()?;
    s.zeroize();
    e.zeroize();

    let t = a.mul_vec(&s_hat)?.add(&e_hat)?;

    let pk = pack_public_key(&t, &rho)?;
    let sk = pack_secret_key(&s_hat)?;
    Ok((pk, sk))
}

/// Key generation with seed material drawn from `rng`.
pub fn keygen<R: RngCore + CryptoRng>(
    params: &KemParams,
    rng: &mut R,
) -> Result<(PublicKey, SecretKey)> {
    let mut d = [0u8; SEED_BYTES];
    rng.fill_bytes(&mut d);
    let out = keygen_deterministic(params, &d);
    d.zeroize();
    out
}

/// Deterministic encapsulation of a fixed-size message under explicit coins.
///
/// The same `(pk, message, coins)` triple always yields the same
/// ciphertext.
pub fn encapsulate(
    params: &KemParams,
    pk: &PublicKey,
    message: &[u8; MESSAGE_BYTES],
    coins: &[u8; SEED_BYTES],
) -> Result<Ciphertext> {
    checked(params)?;

    let (t, rho) = unpack_public_key(pk, params)?;
    let a_t = matrix_from_seed(&rho, params.k, true)?;

    let mut nonce = 0u8;
    let r = sample_noise_vec(coins, &mut nonce, params.k, params.eta1)?;
    let e1 = sample_noise_vec(coins, &mut nonce, params.k, params.eta2)?;
    let e2 = sample::cbd(
        &prf(coins, nonce, 64 * params.eta2 as usize),
        params.eta2 as usize,
    )?;

    let r_hat = r.ntt()?;
    let u = a_t.mul_vec(&r_hat)?.intt()?.add(&e1)?;

    let m_coeffs = serialize::unpack_coeffs(message, 1)?;
    let m_poly = compress::decompress_poly(&m_coeffs, 1)?;
    let v = t
        .dot(&r_hat)?
        .intt()?
        .add(&e2)
        .add(&m_poly);

    pack_ciphertext(u.polys(), &v, params)
}

/// Encapsulation with fresh coins drawn from `rng`.
pub fn encapsulate_with_rng<R: RngCore + CryptoRng>(
    params: &KemParams,
    pk: &PublicKey,
    message: &[u8; MESSAGE_BYTES],
    rng: &mut R,
) -> Result<Ciphertext> {
    let mut coins = [0u8; SEED_BYTES];
    rng.fill_bytes(&mut coins);
    let out = encapsulate(params, pk, message, &coins);
    coins.zeroize();
    out
}

/// Recovers the encapsulated message.
///
/// Compression noise makes recovery probabilistic; the failure rate is a
/// property of the parameter set, bounded statistically rather than checked
/// in-band.
pub fn decapsulate(
    params: &KemParams,
    sk: &SecretKey,
    ct: &Ciphertext,
) -> Result<[u8; MESSAGE_BYTES]> {
    checked(params)?;

    let s_hat = unpack_secret_key(sk, params)?;
    let (u, v) = unpack_ciphertext(ct, params)?;

    let u_hat = PolyVec::from_polys(u).ntt()?;
    let masked = s_hat.dot(&u_hat)?.intt()?;
    let m_poly = v.sub(&masked);

    let compressed = compress::compress_poly(&m_poly, 1)?;
    let bytes = serialize::pack_coeffs(&compressed, 1)?;
    let mut out = [0u8; MESSAGE_BYTES];
    out.copy_from_slice(&bytes);
    Ok(out)
}
