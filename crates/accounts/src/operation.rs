use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ledger_core::Money;
use ledger_events::Event;

/// What an operation attempted to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Deposit,
    Withdraw,
    InitialDeposit,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Deposit => "deposit",
            OperationKind::Withdraw => "withdraw",
            OperationKind::InitialDeposit => "initial_deposit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Success,
    Fail,
}

/// Which pool a credit-account withdrawal drew from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundsType {
    /// Covered entirely by the positive balance.
    #[serde(rename = "own_funds")]
    Own,
    /// Balance was already at or below zero.
    #[serde(rename = "credit_funds")]
    Credit,
    /// Part own balance, part credit line.
    #[serde(rename = "mixed_funds")]
    Mixed,
}

impl FundsType {
    /// Classify a withdrawal of `amount` against the balance *before* it is applied.
    pub fn classify(balance: Money, amount: Money) -> Self {
        if balance >= amount {
            FundsType::Own
        } else if balance <= Money::ZERO {
            FundsType::Credit
        } else {
            FundsType::Mixed
        }
    }
}

pub(crate) const MSG_SUCCESS: &str = "operation completed successfully";
pub(crate) const MSG_NEGATIVE_DEPOSIT: &str = "amount cannot be negative";
pub(crate) const MSG_NON_POSITIVE_WITHDRAW: &str = "amount cannot be negative or zero";
pub(crate) const MSG_INSUFFICIENT_FUNDS: &str = "insufficient funds";
pub(crate) const MSG_CREDIT_LIMIT_EXCEEDED: &str = "credit limit exceeded";
pub(crate) const MSG_OUT_OF_RANGE: &str = "amount out of range";

/// One recorded attempt to change or initialize a balance (immutable once appended).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    /// Requested amount, recorded as given even when the attempt failed.
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
    /// Balance after the attempt (unchanged on failure).
    pub balance_after: Money,
    pub status: OperationStatus,
    pub message: String,
    /// Only set on successful credit-account withdrawals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funds_type: Option<FundsType>,
}

impl Operation {
    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Success
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let status = match self.status {
            OperationStatus::Success => "ok",
            OperationStatus::Fail => "FAIL",
        };
        write!(
            f,
            "{} {:<15} {:>12} -> {:>12} [{}] {}",
            self.occurred_at.format("%Y-%m-%d %H:%M:%S"),
            self.kind.as_str(),
            self.amount,
            self.balance_after,
            status,
            self.message,
        )?;
        if let Some(funds) = self.funds_type {
            write!(f, " ({funds:?} funds)")?;
        }
        Ok(())
    }
}

impl Event for Operation {
    fn event_type(&self) -> &'static str {
        match self.kind {
            OperationKind::Deposit => "ledger.account.deposit",
            OperationKind::Withdraw => "ledger.account.withdraw",
            OperationKind::InitialDeposit => "ledger.account.initial_deposit",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
