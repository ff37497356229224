//! Display Name Value Object

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::error::{AuthError, AuthResult};

/// Maximum length for a display name (in characters)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

/// Customer's full name as shown in the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: &str) -> AuthResult<Self> {
        let normalized: String = raw.nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(AuthError::MalformedInput("Full name is required".into()));
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(AuthError::MalformedInput(format!(
                "Full name must be at most {DISPLAY_NAME_MAX_LENGTH} characters"
            )));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(AuthError::MalformedInput(
                "Full name contains invalid characters".into(),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
