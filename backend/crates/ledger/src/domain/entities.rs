//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{TransactionId, UserId};
use serde::Serialize;

use crate::domain::value_objects::{Amount, Description, Direction};

/// Validated request to move money, before the ledger commits it
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub direction: Direction,
    pub amount: Amount,
    pub description: Description,
}

/// Committed ledger entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub description: Description,
    /// Server-assigned creation time
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Most recent first; ties broken by the higher id
    pub fn newest_first(a: &Transaction, b: &Transaction) -> std::cmp::Ordering {
        b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id))
    }
}
