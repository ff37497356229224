//! Application Configuration
//!
//! Configuration for the advisor chat and its completion client.

use std::time::Duration;

/// Maximum chat message length (in characters)
pub const MAX_MESSAGE_LEN: usize = 4000;

/// Advisor configuration
#[derive(Clone)]
pub struct AdvisorConfig {
    /// Completion service API key; chat is disabled without one
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    /// Base URL of the completion service
    pub endpoint: String,
    /// Per-request timeout for the completion call
    pub timeout: Duration,
    /// Embed the customer's balance in the prompt sent upstream
    pub share_balance: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 1000,
            endpoint: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(30),
            share_balance: true,
        }
    }
}

impl std::fmt::Debug for AdvisorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("share_balance", &self.share_balance)
            .finish()
    }
}
