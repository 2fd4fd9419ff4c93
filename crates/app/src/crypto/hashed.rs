//! One-way hashed secrets.

use std::fmt;

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of a token secret.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HashedSecret(String);

impl HashedSecret {
    /// Digest a raw secret.
    #[must_use]
    pub fn digest(secret: &str) -> Self {
        Self(hex::encode(Sha256::digest(secret.as_bytes())))
    }

    /// Wrap a digest loaded from storage.
    #[must_use]
    pub fn from_stored(hash: String) -> Self {
        Self(hash)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.0.get(..8).unwrap_or(&self.0);

        write!(f, "HashedSecret({prefix}..)")
    }
}
