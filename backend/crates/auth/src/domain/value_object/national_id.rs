//! Fixed-length numeric identifiers
//!
//! Both the national id and the mobile number are externally issued and are
//! validated only by shape: an exact count of ASCII digits.

use serde::Serialize;

use crate::error::{AuthError, AuthResult};

/// Number of digits in a national id
pub const NATIONAL_ID_DIGITS: usize = 12;

/// Number of digits in a mobile number
pub const PHONE_NUMBER_DIGITS: usize = 10;

fn exact_digits(raw: &str, digits: usize, field: &str) -> AuthResult<String> {
    let trimmed = raw.trim();
    if trimmed.len() == digits && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Ok(trimmed.to_string())
    } else {
        Err(AuthError::MalformedInput(format!(
            "{field} must be exactly {digits} digits"
        )))
    }
}

/// 12-digit national identity number, unique per user
///
/// Never serialized into responses; only [`NationalId::masked`] leaves the
/// domain.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NationalId(String);

impl NationalId {
    pub fn new(raw: &str) -> AuthResult<Self> {
        exact_digits(raw, NATIONAL_ID_DIGITS, "National id").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four digits only, e.g. `********9012`
    pub fn masked(&self) -> String {
        let visible = &self.0[self.0.len() - 4..];
        format!("{}{}", "*".repeat(self.0.len() - 4), visible)
    }
}

impl std::fmt::Debug for NationalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NationalId").field(&self.masked()).finish()
    }
}

/// 10-digit mobile number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: &str) -> AuthResult<Self> {
        exact_digits(raw, PHONE_NUMBER_DIGITS, "Mobile number").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
