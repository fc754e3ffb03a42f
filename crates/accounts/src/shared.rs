//! Mutex-serialized account handle for multi-threaded callers.

use std::sync::Arc;

use parking_lot::Mutex;

use ledger_core::{AccountId, Money};

use crate::account::Account;
use crate::capability::BankAccount;
use crate::operation::Operation;

/// Cloneable handle to one account.
///
/// Every read and write takes the same lock, so a balance is never observed
/// without its matching history record.
#[derive(Debug, Clone)]
pub struct SharedAccount {
    inner: Arc<Mutex<Account>>,
}

impl SharedAccount {
    pub fn new(account: Account) -> Self {
        Self {
            inner: Arc::new(Mutex::new(account)),
        }
    }

    pub fn id(&self) -> AccountId {
        self.inner.lock().account_id()
    }

    pub fn deposit(&self, amount: Money) -> bool {
        self.inner.lock().deposit(amount)
    }

    pub fn withdraw(&self, amount: Money) -> bool {
        self.inner.lock().withdraw(amount)
    }

    pub fn balance(&self) -> Money {
        self.inner.lock().balance()
    }

    pub fn available_credit(&self) -> Option<Money> {
        self.inner.lock().available_credit()
    }

    pub fn used_credit(&self) -> Option<Money> {
        self.inner.lock().used_credit()
    }

    /// Run `f` against a consistent view of the account.
    pub fn read<R>(&self, f: impl FnOnce(&Account) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Consistent copy of the whole account (balance and history together).
    pub fn snapshot(&self) -> Account {
        self.inner.lock().clone()
    }
}

impl From<Account> for SharedAccount {
    fn from(account: Account) -> Self {
        Self::new(account)
    }
}

impl BankAccount for SharedAccount {
    fn holder_name(&self) -> String {
        self.read(|a| a.holder().to_string())
    }

    fn balance(&self) -> Money {
        SharedAccount::balance(self)
    }

    fn deposit(&mut self, amount: Money) -> bool {
        SharedAccount::deposit(self, amount)
    }

    fn withdraw(&mut self, amount: Money) -> bool {
        SharedAccount::withdraw(self, amount)
    }

    fn history_snapshot(&self) -> Vec<Operation> {
        self.read(|a| a.history().to_vec())
    }

    fn credit_limit(&self) -> Option<Money> {
        self.read(|a| a.credit_limit())
    }
}
