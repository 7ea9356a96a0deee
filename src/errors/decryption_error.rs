use std::fmt::{Display, Formatter};

use crate::errors::scheme_error::SchemeError;
use crate::errors::symmetric_encryption_error::SymmetricEncryptionError;

/// Every way a decryption can be rejected.
///
/// A rejected ciphertext is a normal outcome, callers are expected to match on it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecryptionError {
    /// IBE only: the randomness re-derived from the recovered plaintext does not
    /// reproduce the ciphertext's `U` component.
    IntegrityCheckFailed,
    /// ABE only: the key holder shares fewer than `required` attributes with the ciphertext.
    InsufficientOverlap { required: usize, available: usize },
    /// The private key has no component for an attribute index chosen for reconstruction.
    MissingKeyComponent { index: u64 },
    InvalidCiphertext(String),
    /// A party tried to decrypt before it obtained a key from its PKG.
    NotAuthenticated,
    Symmetric(SymmetricEncryptionError),
    Scheme(SchemeError),
}

impl Display for DecryptionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DecryptionError::IntegrityCheckFailed => {
                write!(f, "Decryption rejected: integrity check failed")
            }
            DecryptionError::InsufficientOverlap {
                required,
                available,
            } => write!(
                f,
                "Decryption rejected: {} matching attributes required but only {} available",
                required, available
            ),
            DecryptionError::MissingKeyComponent { index } => write!(
                f,
                "Decryption rejected: private key has no component for attribute index {}",
                index
            ),
            DecryptionError::InvalidCiphertext(message) => {
                write!(f, "Decryption rejected: invalid ciphertext: {}", message)
            }
            DecryptionError::NotAuthenticated => {
                write!(f, "Decryption rejected: no private key has been extracted")
            }
            DecryptionError::Symmetric(e) => write!(f, "Decryption rejected: {}", e),
            DecryptionError::Scheme(e) => write!(f, "Decryption rejected: {}", e),
        }
    }
}

impl std::error::Error for DecryptionError {}

impl From<SymmetricEncryptionError> for DecryptionError {
    fn from(value: SymmetricEncryptionError) -> Self {
        DecryptionError::Symmetric(value)
    }
}

impl From<SchemeError> for DecryptionError {
    fn from(value: SchemeError) -> Self {
        DecryptionError::Scheme(value)
    }
}
