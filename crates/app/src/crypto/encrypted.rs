//! Reversibly encrypted secrets.

use std::fmt;

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use zeroize::Zeroize;

use crate::crypto::{CryptoError, Secret};

/// Required key length for AES-256.
pub const ENCRYPTION_KEY_BYTES: usize = 32;

/// Length of the random GCM nonce.
pub const NONCE_BYTES: usize = 12;

/// Symmetric key protecting the master credential. Supplied at startup and never stored.
#[derive(Clone)]
pub struct EncryptionKey([u8; ENCRYPTION_KEY_BYTES]);

impl EncryptionKey {
    /// Build a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] unless exactly 32 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key: [u8; ENCRYPTION_KEY_BYTES] =
            bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: ENCRYPTION_KEY_BYTES,
                actual: bytes.len(),
            })?;

        Ok(Self(key))
    }

    /// Encrypt a plaintext under a fresh random nonce.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EncryptionFailed`] if the cipher rejects the input.
    pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedSecret, CryptoError> {
        let cipher = self.cipher()?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::EncryptionFailed)?;

        Ok(EncryptedSecret {
            ciphertext,
            nonce: nonce.to_vec(),
        })
    }

    /// Decrypt and authenticate a stored secret.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::DecryptionFailed`] when the key is wrong or the data was tampered
    /// with.
    pub fn decrypt(&self, encrypted: &EncryptedSecret) -> Result<Secret, CryptoError> {
        if encrypted.nonce.len() != NONCE_BYTES {
            return Err(CryptoError::InvalidNonceLength {
                expected: NONCE_BYTES,
                actual: encrypted.nonce.len(),
            });
        }

        let cipher = self.cipher()?;

        let mut plaintext = cipher
            .decrypt(
                Nonce::from_slice(&encrypted.nonce),
                encrypted.ciphertext.as_slice(),
            )
            .map_err(|_| CryptoError::DecryptionFailed)?;

        let secret = String::from_utf8(plaintext.clone())
            .map(Secret::new)
            .map_err(|_| CryptoError::DecryptionFailed);

        plaintext.zeroize();

        secret
    }

    fn cipher(&self) -> Result<Aes256Gcm, CryptoError> {
        Aes256Gcm::new_from_slice(&self.0).map_err(|_| CryptoError::InvalidKeyLength {
            expected: ENCRYPTION_KEY_BYTES,
            actual: self.0.len(),
        })
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey(**redacted**)")
    }
}

impl Drop for EncryptionKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// AES-256-GCM ciphertext (tag included) and the nonce it was sealed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedSecret {
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn key(byte: u8) -> TestResult<EncryptionKey> {
        Ok(EncryptionKey::from_bytes(&[byte; ENCRYPTION_KEY_BYTES])?)
    }

    #[test]
    fn rejects_keys_that_are_not_32_bytes() {
        let result = EncryptionKey::from_bytes(b"too-short");

        assert_eq!(
            result.err(),
            Some(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 9
            })
        );
    }

    #[test]
    fn decrypts_what_it_encrypted() -> TestResult {
        let key = key(7)?;

        let encrypted = key.encrypt("bunny-master-key")?;
        let decrypted = key.decrypt(&encrypted)?;

        assert_eq!(decrypted.expose(), "bunny-master-key");
        assert_eq!(encrypted.nonce.len(), NONCE_BYTES);
        assert_ne!(
            encrypted.ciphertext,
            b"bunny-master-key".to_vec(),
            "ciphertext must not be the plaintext"
        );

        Ok(())
    }

    #[test]
    fn every_encryption_uses_a_fresh_nonce() -> TestResult {
        let key = key(7)?;

        let first = key.encrypt("same")?;
        let second = key.encrypt("same")?;

        assert_ne!(first.nonce, second.nonce, "nonces must not repeat");

        Ok(())
    }

    #[test]
    fn wrong_key_fails_to_decrypt() -> TestResult {
        let encrypted = key(1)?.encrypt("bunny-master-key")?;

        let result = key(2)?.decrypt(&encrypted);

        assert_eq!(result.err(), Some(CryptoError::DecryptionFailed));

        Ok(())
    }

    #[test]
    fn tampered_ciphertext_fails_to_decrypt() -> TestResult {
        let key = key(3)?;
        let mut encrypted = key.encrypt("bunny-master-key")?;

        if let Some(byte) = encrypted.ciphertext.first_mut() {
            *byte ^= 0xff;
        }

        assert_eq!(key.decrypt(&encrypted).err(), Some(CryptoError::DecryptionFailed));

        Ok(())
    }
}
