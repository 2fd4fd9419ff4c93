//! Plaintext secret handling.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Number of random bytes in a generated token secret.
pub const TOKEN_SECRET_BYTES: usize = 32;

/// A plaintext secret that is never printed and is wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a random token secret, hex encoded.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        let encoded = hex::encode(bytes);

        bytes.zeroize();

        Self(encoded)
    }

    /// The plaintext. Callers must not log it.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Compare against a candidate in constant time.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(**redacted**)")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Mask a credential for logging: `****` followed by its last four characters.
///
/// Values shorter than nine characters are fully masked.
#[must_use]
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();

    if chars.len() < 9 {
        return "****".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();

    format!("****{tail}")
}
