//! Capability interface shared by owned and shared account handles.

use ledger_core::Money;

use crate::account::Account;
use crate::operation::Operation;

/// Operations every account handle offers.
///
/// Reads return owned values so that lock-guarded handles can implement it too.
pub trait BankAccount {
    fn holder_name(&self) -> String;

    fn balance(&self) -> Money;

    fn deposit(&mut self, amount: Money) -> bool;

    fn withdraw(&mut self, amount: Money) -> bool;

    fn history_snapshot(&self) -> Vec<Operation>;

    /// `None` when the account has no credit line.
    fn credit_limit(&self) -> Option<Money>;

    fn has_credit_limit(&self) -> bool {
        self.credit_limit().is_some()
    }
}

impl BankAccount for Account {
    fn holder_name(&self) -> String {
        self.holder().to_string()
    }

    fn balance(&self) -> Money {
        Account::balance(self)
    }

    fn deposit(&mut self, amount: Money) -> bool {
        Account::deposit(self, amount)
    }

    fn withdraw(&mut self, amount: Money) -> bool {
        Account::withdraw(self, amount)
    }

    fn history_snapshot(&self) -> Vec<Operation> {
        self.history().to_vec()
    }

    fn credit_limit(&self) -> Option<Money> {
        Account::credit_limit(self)
    }
}
