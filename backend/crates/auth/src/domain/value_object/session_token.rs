//! Session Token Value Objects
//!
//! The token is the bearer secret handed to the client in a cookie. The
//! server only ever stores its SHA-256 digest (`SessionKey`), so a leaked
//! session table does not yield usable tokens.

use std::fmt;

use platform::crypto::{random_token, sha256};

/// Entropy of a freshly issued token, in bytes (256 bits)
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Opaque bearer token as sent to the client
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a new random token
    pub fn generate() -> Self {
        Self(random_token(SESSION_TOKEN_BYTES))
    }

    /// Wrap a token presented by a client
    pub fn from_presented(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key for this token
    pub fn key(&self) -> SessionKey {
        SessionKey(sha256(self.0.as_bytes()))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

/// SHA-256 digest of a session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey([u8; 32]);

impl SessionKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}
