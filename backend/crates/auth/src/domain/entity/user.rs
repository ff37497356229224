//! User Entity
//!
//! A registered customer: credentials, profile and account balance.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::money::Cents;

use crate::domain::value_object::{
    display_name::DisplayName,
    handle::Handle,
    national_id::{NationalId, PhoneNumber},
    user_password::UserPassword,
};

/// Validated registration data, before the store assigns an id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub handle: Handle,
    pub password: UserPassword,
    pub display_name: DisplayName,
    pub national_id: NationalId,
    pub phone_number: PhoneNumber,
    /// Opening balance
    pub balance: Cents,
}

/// User entity
///
/// Every field except `balance` is fixed at registration. The balance is
/// written only through `UserRepository::update_balance`, and only by the
/// ledger.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier, immutable
    pub user_id: UserId,
    /// Unique login handle
    pub handle: Handle,
    /// Salted, format-versioned password hash
    pub password: UserPassword,
    pub display_name: DisplayName,
    /// Unique national id
    pub national_id: NationalId,
    pub phone_number: PhoneNumber,
    /// Current balance, never negative
    pub balance: Cents,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Materialize a registration under a freshly assigned id
    pub fn from_new(user_id: UserId, new: NewUser) -> Self {
        Self {
            user_id,
            handle: new.handle,
            password: new.password,
            display_name: new.display_name,
            national_id: new.national_id,
            phone_number: new.phone_number,
            balance: new.balance,
            created_at: Utc::now(),
        }
    }
}
