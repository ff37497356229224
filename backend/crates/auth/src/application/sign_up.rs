//! Sign Up Use Case
//!
//! Creates a new user account with the configured opening balance.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    handle::Handle,
    national_id::{NationalId, PhoneNumber},
    user_password::{RawPassword, UserPassword},
};
use crate::error::AuthResult;

/// Sign up input
pub struct SignUpInput {
    pub handle: String,
    pub password: String,
    pub display_name: String,
    pub national_id: String,
    pub phone_number: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let handle = Handle::new(&input.handle)?;
        let display_name = DisplayName::new(&input.display_name)?;
        let national_id = NationalId::new(&input.national_id)?;
        let phone_number = PhoneNumber::new(&input.phone_number)?;
        let raw_password = RawPassword::new(input.password)?;

        let password =
            tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw_password)).await??;

        // Uniqueness is enforced by the store, atomically with the insert
        let user = self
            .user_repo
            .create(NewUser {
                handle,
                password,
                display_name,
                national_id,
                phone_number,
                balance: self.config.starting_balance,
            })
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            handle = %user.handle,
            "User signed up"
        );

        Ok(user)
    }
}
