//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Chat request
#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

/// Chat response
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub message: String,
}
