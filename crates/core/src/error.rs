//! Domain error model.

use thiserror::Error;

use crate::money::Money;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only construction-time validation produces these. Per-operation outcomes
/// (rejected deposits/withdrawals) are recorded in the account history instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Initial balance was below zero.
    #[error("initial balance cannot be negative: {0}")]
    NegativeBalance(Money),

    /// Credit limit was below zero.
    #[error("credit limit cannot be negative: {0}")]
    NegativeCreditLimit(Money),

    /// Initial balance sits below `-credit_limit`.
    #[error("initial balance {balance} is below the credit floor -{credit_limit}")]
    BelowCreditFloor { balance: Money, credit_limit: Money },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
