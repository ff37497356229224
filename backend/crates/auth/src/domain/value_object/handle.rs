//! Handle Value Object
//!
//! The handle is the human-chosen login name. It is unique across users and
//! is matched exactly on sign-in.
//!
//! ## Invariants
//! - Length: 3 to 32 characters (after NFKC normalization and trimming)
//! - Characters: ASCII letters, digits, `_`, `.`, `-`

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for a handle (in characters)
pub const HANDLE_MIN_LENGTH: usize = 3;

/// Maximum length for a handle (in characters)
pub const HANDLE_MAX_LENGTH: usize = 32;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

// ============================================================================
// Handle
// ============================================================================

/// Validated login handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Normalize and validate a handle submitted at registration
    pub fn new(raw: &str) -> AuthResult<Self> {
        Self::parse(raw).map_err(AuthError::MalformedInput)
    }

    /// Parse a handle submitted at sign-in
    ///
    /// A handle that could never have been registered is not an error the
    /// caller may see; it simply cannot match any user.
    pub fn for_sign_in(raw: &str) -> Option<Self> {
        Self::parse(raw).ok()
    }

    /// Wrap a handle read back from a store
    pub fn from_trusted(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parse(raw: &str) -> Result<Self, String> {
        let normalized: String = raw.nfkc().collect();
        let trimmed = normalized.trim();

        let len = trimmed.chars().count();
        if len < HANDLE_MIN_LENGTH || len > HANDLE_MAX_LENGTH {
            return Err(format!(
                "Username must be between {HANDLE_MIN_LENGTH} and {HANDLE_MAX_LENGTH} characters"
            ));
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c))
        {
            return Err(
                "Username may only contain letters, digits, '_', '.' and '-'".to_string(),
            );
        }

        Ok(Self(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_handles() {
        for raw in ["abc", "john_doe", "j.doe-42", "A".repeat(32).as_str()] {
            assert!(Handle::new(raw).is_ok(), "expected {raw:?} to be valid");
        }
    }

    #[test]
    fn test_length_bounds() {
        assert!(Handle::new("ab").is_err());
        assert!(Handle::new(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_rejects_disallowed_characters() {
        for raw in ["john doe", "john@doe", "ユーザー名", "a+b"] {
            assert!(Handle::new(raw).is_err(), "expected {raw:?} to be rejected");
        }
    }

    #[test]
    fn test_trims_and_normalizes() {
        // Fullwidth letters fold to ASCII under NFKC
        let handle = Handle::new("  ｊｏｈｎ  ").unwrap();
        assert_eq!(handle.as_str(), "john");
    }

    #[test]
    fn test_case_is_preserved() {
        let handle = Handle::new("JohnDoe").unwrap();
        assert_eq!(handle.to_string(), "JohnDoe");
        assert_ne!(handle, Handle::new("johndoe").unwrap());
    }

    #[test]
    fn test_for_sign_in_swallows_invalid_input() {
        assert!(Handle::for_sign_in("x").is_none());
        assert_eq!(
            Handle::for_sign_in("alice").map(|h| h.as_str().to_string()),
            Some("alice".to_string())
        );
    }
}
