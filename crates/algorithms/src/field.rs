//! Modular integer helpers: primality, exponentiation, bit reversal, and
//! primitive-root search.
//!
//! These are the leaf utilities the transform engine is configured with. All
//! of them are pure functions over `u32`/`u64` arithmetic.

use crate::error::{Error, Result};

/// Trial-division primality test.
pub fn is_prime(q: u32) -> bool {
    if q < 2 {
        return false;
    }
    if q == 2 {
        return true;
    }
    if q % 2 == 0 {
        return false;
    }

    let mut i = 3u32;
    while (i as u64) * (i as u64) <= q as u64 {
        if q % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Checks whether `n` is a power of two.
pub fn is_power_of_two(n: usize) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

/// Modular exponentiation: `base^exp mod q`.
pub fn pow_mod(mut base: u64, mut exp: u64, q: u64) -> u64 {
    base %= q;
    let mut acc = 1u64;
    while exp != 0 {
        if exp & 1 == 1 {
            acc = acc * base % q;
        }
        base = base * base % q;
        exp >>= 1;
    }
    acc
}

/// Reverses the low `log2(n)` bits of `i`; `n` must be a power of two.
///
/// Example: `bit_rev(3, 8) == 6` (`0b011` -> `0b110`).
pub fn bit_rev(i: usize, n: usize) -> usize {
    debug_assert!(is_power_of_two(n));
    let bits = n.trailing_zeros();
    let mut out = 0;
    for b in 0..bits {
        if i >> b & 1 == 1 {
            out |= 1 << (bits - 1 - b);
        }
    }
    out
}

/// Finds the smallest primitive `n`-th root of unity mod `q`.
///
/// A primitive root of order `n` exists only when `q` is prime and `n`
/// divides `q - 1`; violating either is a configuration error and is
/// rejected before any search work.
pub fn primitive_root(n: u32, q: u32) -> Result<u32> {
    if !is_prime(q) {
        return Err(Error::param(
            "primitive_root",
            format!("modulus {} is not prime", q),
        ));
    }
    if n == 0 || (q - 1) % n != 0 {
        return Err(Error::param(
            "primitive_root",
            format!("order {} does not divide q - 1 = {}", n, q - 1),
        ));
    }

    // Smallest g whose multiplicative order is exactly n: g^n == 1 while no
    // smaller power in [2, n) hits 1.
    for g in 2..q {
        let mut t = g as u64;
        let mut order = 1u32;
        while t != 1 && order < n {
            t = t * g as u64 % q as u64;
            order += 1;
        }
        if t == 1 && order == n {
            return Ok(g);
        }
    }

    // Unreachable for prime q with n | q - 1, since Z_q* is cyclic.
    Err(Error::Processing {
        operation: "primitive_root",
        details: "no primitive root found",
    })
}
