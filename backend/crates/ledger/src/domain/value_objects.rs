//! Domain Value Objects
//!
//! Immutable value types for the ledger domain.

use std::fmt;

use kernel::money::Cents;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Which way a transaction moves the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Increases the balance
    Credit,
    /// Decreases the balance
    Debit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "credit",
            Direction::Debit => "debit",
        }
    }

    /// Apply `amount` to `balance` in this direction
    ///
    /// A debit below zero is `InsufficientFunds`. A credit past the
    /// representable range is rejected as malformed.
    pub fn apply(self, balance: Cents, amount: Amount) -> LedgerResult<Cents> {
        match self {
            Direction::Credit => balance.checked_add(amount.cents()).ok_or_else(|| {
                LedgerError::MalformedInput("Amount would overflow the balance".into())
            }),
            Direction::Debit => balance
                .checked_sub(amount.cents())
                .ok_or(LedgerError::InsufficientFunds),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strictly positive magnitude of a transaction, in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Amount(Cents);

impl Amount {
    pub fn new(cents: i64) -> LedgerResult<Self> {
        if cents <= 0 {
            return Err(LedgerError::MalformedInput(
                "Amount must be a positive number of cents".into(),
            ));
        }
        Ok(Self(Cents::new(cents as u64)))
    }

    pub fn cents(&self) -> Cents {
        self.0
    }
}

/// Trimmed, non-empty, length-capped transaction description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    pub fn new(raw: &str, max_len: usize) -> LedgerResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::MalformedInput("Description is required".into()));
        }
        if trimmed.chars().count() > max_len {
            return Err(LedgerError::MalformedInput(format!(
                "Description must be at most {max_len} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
