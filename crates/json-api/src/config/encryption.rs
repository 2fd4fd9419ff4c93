//! Encryption Config

use clap::Args;
use zonegate_app::crypto::{CryptoError, EncryptionKey};

/// Master credential encryption settings.
#[derive(Args)]
pub struct EncryptionConfig {
    /// 32-byte key used to encrypt the master credential at rest
    #[arg(long, env = "ENCRYPTION_KEY", hide_env_values = true)]
    pub encryption_key: String,
}

impl EncryptionConfig {
    /// Build the AES-256-GCM key.
    ///
    /// # Errors
    ///
    /// Returns an error when the key is not exactly 32 bytes long.
    pub fn key(&self) -> Result<EncryptionKey, CryptoError> {
        EncryptionKey::from_bytes(self.encryption_key.as_bytes())
    }
}

impl std::fmt::Debug for EncryptionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionConfig")
            .field("encryption_key", &"<redacted>")
            .finish()
    }
}
