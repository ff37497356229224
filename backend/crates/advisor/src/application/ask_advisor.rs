//! Ask Advisor Use Case
//!
//! Forwards a customer's message, with minimal customer context, to the
//! completion service and returns its reply verbatim.

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use kernel::id::UserId;

use crate::application::config::{AdvisorConfig, MAX_MESSAGE_LEN};
use crate::domain::completion::{CompletionRequest, CompletionService};
use crate::domain::prompt::system_prompt;
use crate::error::{AdvisorError, AdvisorResult};

/// Reply used when the service answers without text
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process your request.";

pub struct AskAdvisorUseCase<U, C>
where
    U: UserRepository,
    C: CompletionService,
{
    users: Arc<U>,
    completion: Arc<C>,
    config: Arc<AdvisorConfig>,
}

impl<U, C> AskAdvisorUseCase<U, C>
where
    U: UserRepository,
    C: CompletionService,
{
    pub fn new(users: Arc<U>, completion: Arc<C>, config: Arc<AdvisorConfig>) -> Self {
        Self {
            users,
            completion,
            config,
        }
    }

    pub async fn execute(&self, user_id: UserId, message: Option<String>) -> AdvisorResult<String> {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .ok_or_else(|| AdvisorError::MalformedInput("Message is required".into()))?;
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(AdvisorError::MalformedInput(format!(
                "Message must be at most {MAX_MESSAGE_LEN} characters"
            )));
        }

        // Fresh read: the balance may have changed since sign-in
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AdvisorError::Unauthenticated)?;

        let balance = self.config.share_balance.then_some(user.balance);
        let request = CompletionRequest {
            system: system_prompt(user.display_name.as_str(), balance),
            message,
            max_tokens: self.config.max_tokens,
        };

        let reply = self.completion.complete(&request).await?;

        tracing::info!(user_id = %user_id, answered = reply.is_some(), "Advisor replied");

        Ok(reply.unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}
