//! Account ledger: balance + append-only operation history per holder.
//!
//! Pure domain logic only: no IO, no persistence concerns.

pub mod account;
pub mod capability;
pub mod operation;
pub mod shared;

pub use account::Account;
pub use capability::BankAccount;
pub use operation::{FundsType, Operation, OperationKind, OperationStatus};
pub use shared::SharedAccount;
