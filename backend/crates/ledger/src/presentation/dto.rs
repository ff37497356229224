//! API DTOs (Data Transfer Objects)

use serde::Deserialize;

use crate::application::RecordTransactionInput;
use crate::domain::value_objects::Direction;

/// Create transaction request
///
/// Every field is optional at the wire level so that a missing field is
/// reported by validation, alongside the other field rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    /// Positive amount in cents
    pub amount: Option<i64>,
    #[serde(rename = "type")]
    pub direction: Option<Direction>,
    pub description: Option<String>,
}

impl From<CreateTransactionRequest> for RecordTransactionInput {
    fn from(req: CreateTransactionRequest) -> Self {
        Self {
            amount: req.amount,
            direction: req.direction,
            description: req.description,
        }
    }
}
