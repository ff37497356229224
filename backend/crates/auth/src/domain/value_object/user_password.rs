//! User Password Value Object
//!
//! Domain wrappers around `platform::password`. The platform crate owns the
//! KDF; this module maps its errors into `AuthError` and keeps clear-text
//! secrets out of everything but the hashing call.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("Correct Horse 42".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw).unwrap();
//! assert!(hashed.verify(&raw));
//! ```

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a password for registration, enforcing the password policy
    ///
    /// - 8 to 128 characters after NFKC normalization
    /// - No control characters
    /// - Not a well-known weak password or trivial pattern
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| AuthError::MalformedInput(e.to_string()))
    }

    /// Wrap a password submitted at sign-in
    ///
    /// No policy is applied: a failed login must not reveal anything beyond
    /// "invalid credentials".
    pub fn for_sign_in(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password, format-versioned and safe to store
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password under a fresh salt
    ///
    /// CPU-bound; callers on the async path run this on a blocking worker.
    pub fn from_raw(raw: &RawPassword) -> AuthResult<Self> {
        raw.0.hash().map(Self).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => AuthError::Internal(msg),
        })
    }

    /// Wrap a stored form read back from the credential store
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(stored))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Constant-time verification. Malformed stored forms verify as `false`.
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(&raw.0)
    }

    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
