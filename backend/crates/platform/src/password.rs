//! Password Hashing and Verification
//!
//! Secrets are stretched with Argon2id (memory-hard) under a fresh 128-bit
//! random salt and stored as a single self-describing string:
//!
//! ```text
//! a2id1$<base64url(key)>.<base64url(salt)>
//! ^^^^^ KDF version tag, selects the work-factor parameters
//! ```
//!
//! The version tag lets the parameters change later without invalidating
//! records hashed under an older set.
//!
//! ## Security Features
//! - Memory-hard hashing prevents GPU/ASIC attacks
//! - Zeroization of clear text and derived keys
//! - Constant-time comparison of derived keys
//! - Verification fails closed: malformed stored forms verify as `false`

use std::fmt;

use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::{constant_time_eq, from_base64_url, random_bytes, to_base64_url};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in code points
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Salt length in bytes (128 bits)
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes
pub const KEY_LEN: usize = 32;

/// Separates the derived key from the salt
const SEPARATOR: char = '.';

/// Separates the version tag from the payload
const VERSION_SEPARATOR: char = '$';

// ============================================================================
// KDF versions
// ============================================================================

/// Work-factor parameter set a stored hash was produced with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfVersion {
    /// Argon2id v0x13, m=19456 KiB, t=2, p=1 (OWASP baseline)
    V1,
}

impl KdfVersion {
    /// Version used for every new hash
    pub const CURRENT: KdfVersion = KdfVersion::V1;

    pub fn tag(self) -> &'static str {
        match self {
            KdfVersion::V1 => "a2id1",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "a2id1" => Some(KdfVersion::V1),
            _ => None,
        }
    }

    fn argon2(self) -> Result<Argon2<'static>, argon2::Error> {
        let params = match self {
            KdfVersion::V1 => Params::new(19_456, 2, 1, Some(KEY_LEN))?,
        };
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    fn derive(self, secret: &[u8], salt: &[u8]) -> Result<Zeroizing<Vec<u8>>, argon2::Error> {
        let mut key = Zeroizing::new(vec![0u8; KEY_LEN]);
        self.argon2()?.hash_password_into(secret, salt, &mut key)?;
        Ok(key)
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Core operations
// ============================================================================

/// Hash `secret` under a fresh random salt with the current KDF version.
pub fn hash_secret(secret: &[u8]) -> Result<String, PasswordHashError> {
    let version = KdfVersion::CURRENT;
    let salt = random_bytes(SALT_LEN);
    let key = version
        .derive(secret, &salt)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

    Ok(format!(
        "{}{}{}{}{}",
        version.tag(),
        VERSION_SEPARATOR,
        to_base64_url(&key),
        SEPARATOR,
        to_base64_url(&salt)
    ))
}

/// Check `secret` against a stored form produced by [`hash_secret`].
///
/// Never panics and never errors: an empty, truncated, unversioned or
/// otherwise malformed stored form, and any derivation failure, all yield
/// `false`.
pub fn verify_secret(secret: &[u8], stored: &str) -> bool {
    let Some((tag, payload)) = stored.split_once(VERSION_SEPARATOR) else {
        return false;
    };
    let Some(version) = KdfVersion::from_tag(tag) else {
        return false;
    };
    let Some((key_b64, salt_b64)) = payload.split_once(SEPARATOR) else {
        return false;
    };
    if key_b64.is_empty() || salt_b64.is_empty() {
        return false;
    }

    let (Ok(expected), Ok(salt)) = (from_base64_url(key_b64), from_base64_url(salt_b64)) else {
        return false;
    };
    let expected = Zeroizing::new(expected);

    match version.derive(secret, &salt) {
        Ok(derived) => constant_time_eq(&derived, &expected),
        Err(_) => false,
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password, enforcing the registration policy
    ///
    /// - Minimum 8 / maximum 128 code points after NFKC normalization
    /// - No control characters (space, tab, newline allowed)
    /// - Not empty or whitespace only
    /// - Not a well-known weak password or trivial pattern
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
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

        if is_common_pattern(&normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(Self(normalized))
    }

    /// Wrap a submitted password for verification only.
    ///
    /// Applies the same NFKC normalization as [`ClearTextPassword::new`] but
    /// no policy: a login attempt must never reveal policy details.
    pub fn for_verification(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with the current KDF version
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        hash_secret(self.as_bytes()).map(|stored| HashedPassword { stored })
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

/// Stored password hash (`<version>$<key>.<salt>`)
///
/// Deliberately not validated on construction: [`HashedPassword::verify`]
/// fails closed on anything malformed.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    stored: String,
}

impl HashedPassword {
    /// Wrap a stored form read back from a store
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self { stored: s.into() }
    }

    /// The stored form, for persistence
    pub fn as_str(&self) -> &str {
        &self.stored
    }

    /// Verify a password against this hash
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        verify_secret(password.as_bytes(), &self.stored)
    }

    /// Whether this hash was produced under an older (or unknown) KDF version
    pub fn needs_rehash(&self) -> bool {
        self.stored
            .split_once(VERSION_SEPARATOR)
            .and_then(|(tag, _)| KdfVersion::from_tag(tag))
            != Some(KdfVersion::CURRENT)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    // "aaaaaaaa"
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "qwertyuiop",
        "abcdefgh",
        "letmein1",
        "welcome1",
        "admin123",
        "iloveyou",
        "sunshine",
        "princess",
        "football",
        "baseball",
        "trustno1",
    ];

    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// "12345678", "98765432"
fn is_sequential_numbers(s: &str) -> bool {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();

    let ascending = digits
        .windows(2)
        .all(|w| w[1] == (w[0] + 1) % 10);
    let descending = digits
        .windows(2)
        .all(|w| w[0] == (w[1] + 1) % 10);

    ascending || descending
}

// ============================================================================
// Tests
// ============================================================================
