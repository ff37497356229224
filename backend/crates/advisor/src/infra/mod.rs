//! Infrastructure Layer
//!
//! Outbound adapters.

pub mod anthropic;

pub use anthropic::AnthropicClient;
