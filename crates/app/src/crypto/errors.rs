//! Crypto errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("encryption key must be exactly {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("stored nonce must be exactly {expected} bytes, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    #[error("failed to encrypt secret")]
    EncryptionFailed,

    #[error("failed to decrypt secret")]
    DecryptionFailed,
}
