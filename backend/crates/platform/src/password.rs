//! Password Hashing and Verification
//!
//! - Argon2id hashing with a random per-user salt (PHC string format)
//! - Optional application-wide pepper
//! - Zeroization of clear text on drop
//! - Verification of legacy unsalted SHA-256 hex digests, flagged for rehash
//!
//! Verification is recompute-and-compare in both formats; Argon2 compares in
//! constant time internally and legacy digests go through
//! [`constant_time_eq`](crate::crypto::constant_time_eq).

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, sha256_hex};

// ============================================================================
// Constants
// ============================================================================

/// Maximum password length in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Length of a hex-encoded SHA-256 digest
const LEGACY_DIGEST_LENGTH: usize = 64;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Not `Clone`, and `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// Unicode is normalized using NFKC before validation. Any non-empty
    /// password without control characters is accepted.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut combined = self.as_bytes().to_vec();
        if let Some(p) = pepper {
            combined.extend_from_slice(p);
        }
        combined
    }

    /// Hash the password using Argon2id with a fresh random salt
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut password_bytes = self.peppered(pepper);
        let salt = SaltString::generate(OsRng);

        let result = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));
        password_bytes.zeroize();

        Ok(HashedPassword {
            inner: StoredHash::Argon2(result?),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
enum StoredHash {
    /// PHC string: algorithm, version, params, salt, hash
    Argon2(String),
    /// Unsalted SHA-256 hex digest written by the previous store
    LegacySha256(String),
}

/// Stored password digest
///
/// ```rust
/// use platform::password::{ClearTextPassword, HashedPassword};
///
/// let password = ClearTextPassword::new("secret".to_string()).unwrap();
/// let hashed = password.hash(None).unwrap();
/// let restored = HashedPassword::from_stored(hashed.as_str()).unwrap();
/// assert!(restored.verify(&password, None));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    inner: StoredHash,
}

impl HashedPassword {
    /// Parse a stored digest (PHC string or legacy hex digest)
    pub fn from_stored(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let stored = s.into();

        if PasswordHash::new(&stored).is_ok() {
            return Ok(Self {
                inner: StoredHash::Argon2(stored),
            });
        }

        if stored.len() == LEGACY_DIGEST_LENGTH && stored.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Self {
                inner: StoredHash::LegacySha256(stored.to_ascii_lowercase()),
            });
        }

        Err(PasswordHashError::InvalidHashFormat)
    }

    /// String form for storage
    pub fn as_str(&self) -> &str {
        match &self.inner {
            StoredHash::Argon2(phc) => phc,
            StoredHash::LegacySha256(hex) => hex,
        }
    }

    /// Verify a password against this hash
    ///
    /// The pepper must match the one used during hashing. Legacy digests
    /// were never peppered, so the pepper is ignored for them.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        match &self.inner {
            StoredHash::Argon2(phc) => {
                let Ok(parsed_hash) = PasswordHash::new(phc) else {
                    return false;
                };
                let mut password_bytes = password.peppered(pepper);
                let ok = Argon2::default()
                    .verify_password(&password_bytes, &parsed_hash)
                    .is_ok();
                password_bytes.zeroize();
                ok
            }
            StoredHash::LegacySha256(hex) => {
                let computed = sha256_hex(password.as_bytes());
                constant_time_eq(computed.as_bytes(), hex.as_bytes())
            }
        }
    }

    /// True when the digest should be replaced by a fresh Argon2id hash
    pub fn needs_rehash(&self) -> bool {
        match &self.inner {
            StoredHash::Argon2(phc) => match PasswordHash::new(phc) {
                Ok(parsed) => parsed.algorithm != argon2::Algorithm::Argon2id.ident(),
                Err(_) => true,
            },
            StoredHash::LegacySha256(_) => true,
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = match self.inner {
            StoredHash::Argon2(_) => "argon2",
            StoredHash::LegacySha256(_) => "legacy-sha256",
        };
        f.debug_struct("HashedPassword")
            .field("format", &format)
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> ClearTextPassword {
        ClearTextPassword::new(raw.to_string()).unwrap()
    }

    #[test]
    fn test_short_passwords_are_accepted() {
        assert!(ClearTextPassword::new("pw".to_string()).is_ok());
        assert!(ClearTextPassword::new("secret".to_string()).is_ok());
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        let result = ClearTextPassword::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_empty_or_whitespace() {
        assert_eq!(
            ClearTextPassword::new(String::new()).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
        assert_eq!(
            ClearTextPassword::new("    ".to_string()).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("abc\u{0007}def".to_string());
        assert_eq!(result.unwrap_err(), PasswordPolicyError::InvalidCharacter);
    }

    #[test]
    fn test_hash_and_verify() {
        let hashed = password("secret").hash(None).unwrap();

        assert!(hashed.verify(&password("secret"), None));
        assert!(!hashed.verify(&password("Secret"), None));
        assert!(!hashed.needs_rehash());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = password("secret").hash(None).unwrap();
        let second = password("secret").hash(None).unwrap();
        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn test_hash_with_pepper() {
        let pepper = b"store_pepper";
        let hashed = password("secret").hash(Some(pepper)).unwrap();

        assert!(hashed.verify(&password("secret"), Some(pepper)));
        assert!(!hashed.verify(&password("secret"), None));
        assert!(!hashed.verify(&password("secret"), Some(b"other")));
    }

    #[test]
    fn test_stored_roundtrip() {
        let hashed = password("secret").hash(None).unwrap();
        let restored = HashedPassword::from_stored(hashed.as_str().to_string()).unwrap();
        assert!(restored.verify(&password("secret"), None));
    }

    #[test]
    fn test_legacy_digest_verifies_and_needs_rehash() {
        // sha256("secret")
        let legacy = "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b";
        let hashed = HashedPassword::from_stored(legacy).unwrap();

        assert!(hashed.verify(&password("secret"), None));
        assert!(!hashed.verify(&password("secrets"), None));
        assert!(hashed.needs_rehash());
    }

    #[test]
    fn test_invalid_stored_hash() {
        assert!(HashedPassword::from_stored("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", password("hunter2"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("hunter2"));
    }
}
