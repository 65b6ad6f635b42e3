//! Packed wire formats for keys and ciphertexts.
//!
//! Public key: `k` transform-domain polynomials at 12 bits each, followed by
//! the 32-byte matrix seed. Secret key: `k` transform-domain polynomials at
//! 12 bits. Ciphertext: the `u` vector compressed to `du` bits per
//! coefficient, then `v` compressed to `dv` bits, each bit-packed; the two
//! parts sit at fixed offsets computed from the parameter set.

use latkem_algorithms::poly::{NttPoly, NttPolyVec, Poly};
use latkem_algorithms::{compress, serialize};
use latkem_params::{KemParams, KEY_PACK_BITS, RING_N, SEED_BYTES};

use crate::error::{validate, Result};
use crate::keys::{Ciphertext, PublicKey, SecretKey};

/// Encodes the public vector `t` and matrix seed `rho`.
pub fn pack_public_key(t: &NttPolyVec, rho: &[u8; SEED_BYTES]) -> Result<PublicKey> {
    let mut out = Vec::with_capacity(t.dim() * RING_N * KEY_PACK_BITS / 8 + SEED_BYTES);
    for poly in t.polys() {
        out.extend_from_slice(&serialize::pack_coeffs(poly.coeffs(), KEY_PACK_BITS)?);
    }
    out.extend_from_slice(rho);
    Ok(PublicKey::new(out))
}

/// Decodes a public key into the vector `t` and the matrix seed.
pub fn unpack_public_key(
    pk: &PublicKey,
    params: &KemParams,
) -> Result<(NttPolyVec, [u8; SEED_BYTES])> {
    validate::key_length("public key", pk.len(), params.public_key_size())?;

    let bytes = pk.as_bytes();
    let stride = RING_N * KEY_PACK_BITS / 8;
    let mut polys = Vec::with_capacity(params.k);
    for chunk in bytes[..params.k * stride].chunks_exact(stride) {
        polys.push(NttPoly::from_raw(serialize::unpack_coeffs(
            chunk,
            KEY_PACK_BITS,
        )?));
    }
    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(&bytes[params.k * stride..]);
    Ok((NttPolyVec::from_polys(polys), rho))
}

/// Encodes the transform-domain secret vector `s`.
pub fn pack_secret_key(s: &NttPolyVec) -> Result<SecretKey> {
    let mut out = Vec::with_capacity(s.dim() * RING_N * KEY_PACK_BITS / 8);
    for poly in s.polys() {
        out.extend_from_slice(&serialize::pack_coeffs(poly.coeffs(), KEY_PACK_BITS)?);
    }
    Ok(SecretKey::new(out))
}

/// Decodes a secret key into the transform-domain vector `s`.
pub fn unpack_secret_key(sk: &SecretKey, params: &KemParams) -> Result<NttPolyVec> {
    validate::key_length("secret key", sk.len(), params.secret_key_size())?;

    let stride = RING_N * KEY_PACK_BITS / 8;
    let mut polys = Vec::with_capacity(params.k);
    for chunk in sk.as_bytes().chunks_exact(stride) {
        polys.push(NttPoly::from_raw(serialize::unpack_coeffs(
            chunk,
            KEY_PACK_BITS,
        )?));
    }
    Ok(NttPolyVec::from_polys(polys))
}

/// Compresses and packs the ciphertext parts `u` (vector) and `v` (scalar).
pub fn pack_ciphertext(u: &[Poly], v: &Poly, params: &KemParams) -> Result<Ciphertext> {
    let mut out = Vec::with_capacity(params.ciphertext_size());
    for poly in u {
        let compressed = compress::compress_poly(poly, params.du)?;
        out.extend_from_slice(&serialize::pack_coeffs(&compressed, params.du)?);
    }
    let compressed = compress::compress_poly(v, params.dv)?;
    out.extend_from_slice(&serialize::pack_coeffs(&compressed, params.dv)?);
    Ok(Ciphertext::new(out))
}

/// Splits, unpacks and decompresses a ciphertext back into `u` and `v`.
pub fn unpack_ciphertext(ct: &Ciphertext, params: &KemParams) -> Result<(Vec<Poly>, Poly)> {
    validate::ciphertext_length(ct.len(), params.ciphertext_size())?;

    let bytes = ct.as_bytes();
    let u_stride = RING_N * params.du / 8;
    let mut u = Vec::with_capacity(params.k);
    for chunk in bytes[..params.ciphertext_u_size()].chunks_exact(u_stride) {
        let coeffs = serialize::unpack_coeffs(chunk, params.du)?;
        u.push(compress::decompress_poly(&coeffs, params.du)?);
    }
    let coeffs = serialize::unpack_coeffs(&bytes[params.ciphertext_u_size()..], params.dv)?;
    let v = compress::decompress_poly(&coeffs, params.dv)?;
    Ok((u, v))
}
