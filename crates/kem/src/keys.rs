//! Owned byte containers for key material and ciphertexts.
//!
//! Secret material is wiped on drop; public material is plain bytes. Shapes
//! are validated where the bytes are interpreted, not here.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// An encoded public key: the packed vector `t` followed by the 32-byte
/// matrix seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(Vec<u8>);

/// An encoded secret key: the packed transform-domain secret vector.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Vec<u8>);

/// An encoded single-block ciphertext: compressed `u` then compressed `v`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext(Vec<u8>);

macro_rules! byte_newtype {
    ($name:ident) => {
        impl $name {
            pub fn new(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn to_vec(&self) -> Vec<u8> {
                self.0.clone()
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }
        }
    };
}

byte_newtype!(PublicKey);
byte_newtype!(SecretKey);
byte_newtype!(Ciphertext);
