//! The reference walkthroughs: one plain account, one credit account.

use ledger_accounts::{Account, BankAccount};
use ledger_core::DomainResult;
use rust_decimal::Decimal;

/// Plain account: two successful operations, then two rejected ones.
pub fn plain_account() -> DomainResult<Account> {
    let mut account = Account::new("Ivan Ivanov", Decimal::new(1000, 0))?;

    account.deposit(Decimal::new(500, 0));
    account.withdraw(Decimal::new(200, 0));
    // insufficient funds
    account.withdraw(Decimal::new(2000, 0));
    // negative amount
    account.deposit(Decimal::new(-100, 0));

    Ok(account)
}

/// Credit account: one withdrawal spanning own funds and the credit line.
pub fn credit_account() -> DomainResult<Account> {
    let mut account =
        Account::with_credit("Petr Petrov", Decimal::new(1000, 0), Decimal::new(5000, 0))?;

    // 1000 own + 2000 credit
    account.withdraw(Decimal::new(3000, 0));

    Ok(account)
}

/// One-line summary usable for any account handle.
pub fn summary(account: &impl BankAccount) -> String {
    let mut line = format!(
        "{}: balance {} ({} operations)",
        account.holder_name(),
        account.balance(),
        account.history_snapshot().len()
    );
    if let Some(limit) = account.credit_limit() {
        line.push_str(&format!(", credit limit {limit}"));
    }
    line
}
