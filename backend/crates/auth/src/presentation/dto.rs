//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::money::Cents;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub national_id: String,
    pub mobile_number: String,
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// User
// ============================================================================

/// Public view of a user
///
/// Carries neither the password hash nor the national id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub mobile_number: String,
    /// Balance in cents
    pub balance: Cents,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id,
            username: user.handle.to_string(),
            full_name: user.display_name.to_string(),
            mobile_number: user.phone_number.to_string(),
            balance: user.balance,
            created_at: user.created_at,
        }
    }
}
