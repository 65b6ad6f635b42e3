//! Error types for the KEM pipeline and block layer.

use std::borrow::Cow;
use std::fmt;

use latkem_algorithms::Error as AlgorithmError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A failure bubbled up from the algorithmic core.
    Primitive(AlgorithmError),

    /// A parameter set rejected before any cryptographic work.
    Params { reason: Cow<'static, str> },

    /// Key material whose shape does not match the parameter set.
    InvalidKey {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Ciphertext bytes whose shape does not match the parameter set.
    InvalidCiphertext { expected: usize, actual: usize },

    /// Recovered plaintext whose padding is not well formed.
    Padding { reason: &'static str },
}

impl Error {
    pub fn params(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Params {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(e) => write!(f, "primitive error: {}", e),
            Self::Params { reason } => write!(f, "invalid parameter set: {}", reason),
            Self::InvalidKey {
                context,
                expected,
                actual,
            } => write!(
                f,
                "invalid {}: expected {} bytes, got {}",
                context, expected, actual
            ),
            Self::InvalidCiphertext { expected, actual } => write!(
                f,
                "invalid ciphertext: expected {} bytes, got {}",
                expected, actual
            ),
            Self::Padding { reason } => write!(f, "padding error: {}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Primitive(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AlgorithmError> for Error {
    fn from(e: AlgorithmError) -> Self {
        Self::Primitive(e)
    }
}

/// Validation helpers shared across the crate.
pub mod validate {
    use super::{Error, Result};

    pub fn key_length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
        if actual != expected {
            return Err(Error::InvalidKey {
                context,
                expected,
                actual,
            });
        }
        Ok(())
    }

    pub fn ciphertext_length(actual: usize, expected: usize) -> Result<()> {
        if actual != expected {
            return Err(Error::InvalidCiphertext { expected, actual });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        let e = Error::InvalidKey {
            context: "public key",
            expected: 800,
            actual: 10,
        };
        assert_eq!(e.to_string(), "invalid public key: expected 800 bytes, got 10");

        let e = Error::params("k must be positive");
        assert!(e.to_string().contains("k must be positive"));
    }

    #[test]
    fn primitive_errors_convert() {
        let inner = AlgorithmError::Processing {
            operation: "test",
            details: "failed".into(),
        };
        let outer: Error = inner.into();
        assert!(matches!(outer, Error::Primitive(_)));
        assert!(std::error::Error::source(&outer).is_some());
    }

    #[test]
    fn validate_helpers() {
        assert!(validate::key_length("secret key", 768, 768).is_ok());
        assert!(matches!(
            validate::key_length("secret key", 767, 768),
            Err(Error::InvalidKey { .. })
        ));
        assert!(matches!(
            validate::ciphertext_length(0, 768),
            Err(Error::InvalidCiphertext { .. })
        ));
    }
}
