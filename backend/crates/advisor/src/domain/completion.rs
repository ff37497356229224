//! Completion Service Port
//!
//! The external text-completion service is opaque to this crate: a system
//! prompt and one user message go in, text comes out.

use crate::error::AdvisorResult;

/// A single-turn completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub message: String,
    pub max_tokens: u32,
}

/// Text-completion service
#[trait_variant::make(CompletionService: Send)]
pub trait LocalCompletionService {
    /// Complete the request
    ///
    /// `Ok(None)` means the service answered without any text.
    async fn complete(&self, request: &CompletionRequest) -> AdvisorResult<Option<String>>;
}
