use chrono::Utc;

use ledger_core::{AccountId, DomainError, DomainResult, Entity, Money, money};
use ledger_events::EventEnvelope;

use crate::operation::{
    FundsType, MSG_CREDIT_LIMIT_EXCEEDED, MSG_INSUFFICIENT_FUNDS, MSG_NEGATIVE_DEPOSIT,
    MSG_NON_POSITIVE_WITHDRAW, MSG_OUT_OF_RANGE, MSG_SUCCESS, Operation, OperationKind,
    OperationStatus,
};

/// Account variant. Decides how far the balance may drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccountKind {
    /// Balance never goes below zero.
    Plain,
    /// Balance may go down to `-limit`.
    Credit { limit: Money },
}

impl AccountKind {
    fn credit_limit(self) -> Option<Money> {
        match self {
            AccountKind::Plain => None,
            AccountKind::Credit { limit } => Some(limit),
        }
    }
}

/// Balance + append-only history. Only the owning `Account` appends.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LedgerCore {
    balance: Money,
    history: Vec<Operation>,
}

impl LedgerCore {
    fn opened(balance: Money) -> Self {
        let mut ledger = Self {
            balance,
            history: Vec::new(),
        };
        if balance > Money::ZERO {
            ledger.append(
                OperationKind::InitialDeposit,
                balance,
                OperationStatus::Success,
                MSG_SUCCESS,
                None,
            );
        }
        ledger
    }

    fn append(
        &mut self,
        kind: OperationKind,
        amount: Money,
        status: OperationStatus,
        message: &str,
        funds_type: Option<FundsType>,
    ) -> &Operation {
        self.history.push(Operation {
            kind,
            amount,
            occurred_at: Utc::now(),
            balance_after: self.balance,
            status,
            message: message.to_string(),
            funds_type,
        });
        &self.history[self.history.len() - 1]
    }

    fn reject(&mut self, kind: OperationKind, amount: Money, message: &str) -> &Operation {
        self.append(kind, amount, OperationStatus::Fail, message, None)
    }

    /// Balance update and history append happen together.
    fn apply(
        &mut self,
        kind: OperationKind,
        amount: Money,
        new_balance: Money,
        funds_type: Option<FundsType>,
    ) -> &Operation {
        self.balance = new_balance;
        self.append(kind, amount, OperationStatus::Success, MSG_SUCCESS, funds_type)
    }
}

/// One holder's account: balance plus operation history, optionally with a credit line.
///
/// Per-operation failures never surface as errors: `deposit`/`withdraw` return
/// `false` and leave a `Fail` record in the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    holder: String,
    kind: AccountKind,
    ledger: LedgerCore,
}

impl Account {
    /// Open a plain account. Rejects a negative initial balance.
    pub fn new(holder: impl Into<String>, initial_balance: Money) -> DomainResult<Self> {
        Self::open(holder.into(), initial_balance, AccountKind::Plain)
    }

    /// Open a credit-enabled account.
    ///
    /// Fails on a negative limit, on an initial balance below `-credit_limit`,
    /// and on any negative initial balance.
    pub fn with_credit(
        holder: impl Into<String>,
        initial_balance: Money,
        credit_limit: Money,
    ) -> DomainResult<Self> {
        if credit_limit < Money::ZERO {
            return Err(DomainError::NegativeCreditLimit(credit_limit));
        }
        if initial_balance < -credit_limit {
            return Err(DomainError::BelowCreditFloor {
                balance: initial_balance,
                credit_limit,
            });
        }
        Self::open(
            holder.into(),
            initial_balance,
            AccountKind::Credit {
                limit: credit_limit,
            },
        )
    }

    fn open(holder: String, initial_balance: Money, kind: AccountKind) -> DomainResult<Self> {
        if initial_balance < Money::ZERO {
            return Err(DomainError::NegativeBalance(initial_balance));
        }

        let account = Self {
            id: AccountId::new(),
            holder,
            kind,
            ledger: LedgerCore::opened(initial_balance),
        };
        tracing::debug!(
            account_id = %account.id,
            holder = %account.holder,
            initial_balance = %initial_balance,
            credit_limit = ?kind.credit_limit(),
            "account opened"
        );
        Ok(account)
    }

    /// Replace the generated identifier (useful for deterministic tests and imports).
    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = id;
        self
    }

    pub fn account_id(&self) -> AccountId {
        self.id
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Money {
        self.ledger.balance
    }

    /// Read-only view of every recorded attempt, in insertion order.
    pub fn history(&self) -> &[Operation] {
        &self.ledger.history
    }

    pub fn last_operation(&self) -> Option<&Operation> {
        self.ledger.history.last()
    }

    /// History wrapped with this account's id and 1-based stream positions.
    pub fn history_envelopes(&self) -> Vec<EventEnvelope<Operation>> {
        EventEnvelope::wrap_all(self.id, &self.ledger.history)
    }

    pub fn has_credit_limit(&self) -> bool {
        self.kind.credit_limit().is_some()
    }

    pub fn credit_limit(&self) -> Option<Money> {
        self.kind.credit_limit()
    }

    /// `balance + credit_limit`, saturating at `Money::MAX`; `None` for plain accounts.
    pub fn available_credit(&self) -> Option<Money> {
        self.kind.credit_limit().map(|limit| {
            self.ledger
                .balance
                .checked_add(limit)
                .unwrap_or(Money::MAX)
        })
    }

    /// `max(-balance, 0)`; `None` for plain accounts.
    pub fn used_credit(&self) -> Option<Money> {
        self.kind
            .credit_limit()
            .map(|_| money::negative_part(self.ledger.balance))
    }

    /// Add `amount` to the balance. Zero is accepted; negative amounts are rejected.
    pub fn deposit(&mut self, amount: Money) -> bool {
        let kind = OperationKind::Deposit;
        if amount < Money::ZERO {
            let op = self.ledger.reject(kind, amount, MSG_NEGATIVE_DEPOSIT);
            return trace_outcome(self.id, op);
        }
        let op = match self.ledger.balance.checked_add(amount) {
            Some(new_balance) => self.ledger.apply(kind, amount, new_balance, None),
            None => self.ledger.reject(kind, amount, MSG_OUT_OF_RANGE),
        };
        trace_outcome(self.id, op)
    }

    /// Take `amount` from the balance, drawing on the credit line when the account has one.
    pub fn withdraw(&mut self, amount: Money) -> bool {
        match self.kind.credit_limit() {
            None => self.withdraw_own(amount),
            Some(limit) => self.withdraw_with_credit(amount, limit),
        }
    }

    fn withdraw_own(&mut self, amount: Money) -> bool {
        let kind = OperationKind::Withdraw;
        let outcome = if amount <= Money::ZERO {
            Err(MSG_NON_POSITIVE_WITHDRAW)
        } else if amount > self.ledger.balance {
            Err(MSG_INSUFFICIENT_FUNDS)
        } else {
            self.ledger
                .balance
                .checked_sub(amount)
                .ok_or(MSG_OUT_OF_RANGE)
        };

        let op = match outcome {
            Ok(new_balance) => self.ledger.apply(kind, amount, new_balance, None),
            Err(message) => self.ledger.reject(kind, amount, message),
        };
        trace_outcome(self.id, op)
    }

    fn withdraw_with_credit(&mut self, amount: Money, limit: Money) -> bool {
        let kind = OperationKind::Withdraw;
        if amount <= Money::ZERO {
            let op = self.ledger.reject(kind, amount, MSG_NON_POSITIVE_WITHDRAW);
            return trace_outcome(self.id, op);
        }
        // `amount <= balance + limit` checked as `balance - amount >= -limit`;
        // a difference below `Money::MIN` is past any floor.
        let new_balance = match self.ledger.balance.checked_sub(amount) {
            Some(new_balance) if new_balance >= -limit => new_balance,
            _ => {
                let op = self.ledger.reject(kind, amount, MSG_CREDIT_LIMIT_EXCEEDED);
                return trace_outcome(self.id, op);
            }
        };

        // Classified against the pre-withdrawal balance.
        let funds = FundsType::classify(self.ledger.balance, amount);
        let op = self.ledger.apply(kind, amount, new_balance, Some(funds));
        trace_outcome(self.id, op)
    }
}

fn trace_outcome(account_id: AccountId, op: &Operation) -> bool {
    if op.is_success() {
        tracing::debug!(
            account_id = %account_id,
            kind = op.kind.as_str(),
            amount = %op.amount,
            balance_after = %op.balance_after,
            funds_type = ?op.funds_type,
            "operation applied"
        );
    } else {
        tracing::warn!(
            account_id = %account_id,
            kind = op.kind.as_str(),
            amount = %op.amount,
            balance_after = %op.balance_after,
            reason = %op.message,
            "operation rejected"
        );
    }
    op.is_success()
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn money(v: i64) -> Money {
        Decimal::new(v, 0)
    }

    fn cents(v: i64) -> Money {
        Decimal::new(v, 2)
    }

    fn statuses(account: &Account) -> Vec<OperationStatus> {
        account.history().iter().map(|op| op.status).collect()
    }

    #[test]
    fn opening_with_positive_balance_records_initial_deposit() {
        let account = Account::new("A", money(1000)).unwrap();

        assert_eq!(account.balance(), money(1000));
        assert_eq!(account.holder(), "A");
        assert_eq!(account.history().len(), 1);

        let op = &account.history()[0];
        assert_eq!(op.kind, OperationKind::InitialDeposit);
        assert_eq!(op.status, OperationStatus::Success);
        assert_eq!(op.amount, money(1000));
        assert_eq!(op.balance_after, money(1000));
    }

    #[test]
    fn opening_with_zero_balance_has_empty_history() {
        let account = Account::new("A", Money::ZERO).unwrap();
        assert_eq!(account.balance(), Money::ZERO);
        assert!(account.history().is_empty());
        assert!(account.last_operation().is_none());
    }

    #[test]
    fn negative_initial_balance_is_rejected() {
        let err = Account::new("A", money(-1)).unwrap_err();
        assert_eq!(err, DomainError::NegativeBalance(money(-1)));
    }

    #[test]
    fn credit_construction_validation() {
        assert_eq!(
            Account::with_credit("B", money(0), money(-10)).unwrap_err(),
            DomainError::NegativeCreditLimit(money(-10))
        );
        assert_eq!(
            Account::with_credit("B", money(-600), money(500)).unwrap_err(),
            DomainError::BelowCreditFloor {
                balance: money(-600),
                credit_limit: money(500),
            }
        );
        assert_eq!(
            Account::with_credit("B", money(-100), money(500)).unwrap_err(),
            DomainError::NegativeBalance(money(-100))
        );

        let account = Account::with_credit("B", Money::ZERO, Money::ZERO).unwrap();
        assert!(account.has_credit_limit());
        assert_eq!(account.available_credit(), Some(Money::ZERO));
    }

    #[test]
    fn reference_plain_scenario() {
        let mut account = Account::new("A", money(1000)).unwrap();

        assert!(account.deposit(money(500)));
        assert_eq!(account.balance(), money(1500));

        assert!(account.withdraw(money(200)));
        assert_eq!(account.balance(), money(1300));

        assert!(!account.withdraw(money(2000)));
        assert_eq!(account.balance(), money(1300));
        assert_eq!(account.last_operation().unwrap().message, "insufficient funds");

        assert!(!account.deposit(money(-100)));
        assert_eq!(account.balance(), money(1300));
        let last = account.last_operation().unwrap();
        assert_eq!(last.message, "amount cannot be negative");
        assert_eq!(last.amount, money(-100));
        assert_eq!(last.balance_after, money(1300));

        assert_eq!(account.history().len(), 5);
        assert_eq!(
            statuses(&account),
            vec![
                OperationStatus::Success,
                OperationStatus::Success,
                OperationStatus::Success,
                OperationStatus::Fail,
                OperationStatus::Fail,
            ]
        );
    }

    #[test]
    fn zero_deposit_is_a_success() {
        let mut account = Account::new("A", money(10)).unwrap();
        assert!(account.deposit(Money::ZERO));
        assert_eq!(account.balance(), money(10));
        assert_eq!(account.last_operation().unwrap().status, OperationStatus::Success);
    }

    #[test]
    fn plain_withdraw_rejects_zero_and_negative() {
        let mut account = Account::new("A", money(10)).unwrap();
        assert!(!account.withdraw(Money::ZERO));
        assert!(!account.withdraw(money(-5)));
        assert_eq!(account.balance(), money(10));
        assert!(
            account.history()[1..]
                .iter()
                .all(|op| op.message == "amount cannot be negative or zero")
        );
    }

    #[test]
    fn plain_withdraw_of_whole_balance_succeeds() {
        let mut account = Account::new("A", money(10)).unwrap();
        assert!(account.withdraw(money(10)));
        assert_eq!(account.balance(), Money::ZERO);
        assert_eq!(account.last_operation().unwrap().funds_type, None);
    }

    #[test]
    fn plain_account_has_no_credit_capability() {
        let account = Account::new("A", money(10)).unwrap();
        assert!(!account.has_credit_limit());
        assert_eq!(account.credit_limit(), None);
        assert_eq!(account.available_credit(), None);
        assert_eq!(account.used_credit(), None);
    }

    #[test]
    fn reference_credit_scenario() {
        let mut account = Account::with_credit("B", money(1000), money(5000)).unwrap();

        assert!(account.withdraw(money(3000)));
        assert_eq!(account.balance(), money(-2000));
        assert_eq!(account.available_credit(), Some(money(3000)));
        assert_eq!(account.used_credit(), Some(money(2000)));
        assert_eq!(account.credit_limit(), Some(money(5000)));
        assert_eq!(
            account.last_operation().unwrap().funds_type,
            Some(FundsType::Mixed)
        );
    }

    #[test]
    fn credit_withdraw_records_computed_funds_type() {
        let mut account = Account::with_credit("B", money(1000), money(5000)).unwrap();

        assert!(account.withdraw(money(400)));
        assert_eq!(account.last_operation().unwrap().funds_type, Some(FundsType::Own));

        assert!(account.withdraw(money(600)));
        assert_eq!(account.last_operation().unwrap().funds_type, Some(FundsType::Own));
        assert_eq!(account.balance(), Money::ZERO);

        assert!(account.withdraw(money(100)));
        assert_eq!(account.last_operation().unwrap().funds_type, Some(FundsType::Credit));
    }

    #[test]
    fn credit_withdraw_beyond_limit_fails() {
        let mut account = Account::with_credit("B", money(100), money(500)).unwrap();

        assert!(!account.withdraw(money(601)));
        assert_eq!(account.balance(), money(100));
        let last = account.last_operation().unwrap();
        assert_eq!(last.message, "credit limit exceeded");
        assert_eq!(last.funds_type, None);

        assert!(account.withdraw(money(600)));
        assert_eq!(account.balance(), money(-500));
        assert_eq!(account.available_credit(), Some(Money::ZERO));
        assert!(!account.withdraw(cents(1)));
    }

    #[test]
    fn credit_withdraw_rejects_non_positive() {
        let mut account = Account::with_credit("B", money(100), money(500)).unwrap();
        assert!(!account.withdraw(Money::ZERO));
        assert_eq!(
            account.last_operation().unwrap().message,
            "amount cannot be negative or zero"
        );
    }

    #[test]
    fn deposit_past_decimal_range_is_recorded_as_failure() {
        let mut account = Account::new("A", Decimal::ONE).unwrap();

        assert!(!account.deposit(Decimal::MAX));
        assert_eq!(account.balance(), Decimal::ONE);
        assert_eq!(account.history().len(), 2);
        let last = account.last_operation().unwrap();
        assert_eq!(last.status, OperationStatus::Fail);
        assert_eq!(last.message, "amount out of range");
        assert_eq!(last.amount, Decimal::MAX);
        assert_eq!(last.balance_after, Decimal::ONE);

        assert!(account.deposit(Decimal::MAX - Decimal::ONE));
        assert_eq!(account.balance(), Decimal::MAX);
    }

    #[test]
    fn credit_headroom_beyond_decimal_range_does_not_overflow() {
        let mut account = Account::with_credit("B", Decimal::ONE, Decimal::MAX).unwrap();
        assert_eq!(account.available_credit(), Some(Decimal::MAX));

        assert!(account.withdraw(Decimal::ONE));
        assert_eq!(account.balance(), Money::ZERO);
        assert_eq!(account.available_credit(), Some(Decimal::MAX));

        assert!(account.withdraw(Decimal::MAX));
        assert_eq!(account.balance(), Decimal::MIN);
        assert_eq!(account.used_credit(), Some(Decimal::MAX));
        assert_eq!(account.available_credit(), Some(Money::ZERO));

        // balance - amount would fall below Decimal::MIN
        assert!(!account.withdraw(Decimal::ONE));
        assert_eq!(account.balance(), Decimal::MIN);
        let last = account.last_operation().unwrap();
        assert_eq!(last.message, "credit limit exceeded");
        assert_eq!(account.history().len(), 4);
    }

    #[test]
    fn envelopes_follow_history_order() {
        let id = AccountId::new();
        let mut account = Account::new("A", money(10)).unwrap().with_id(id);
        account.deposit(money(5));
        account.withdraw(money(100));

        let envelopes = account.history_envelopes();
        assert_eq!(envelopes.len(), 3);
        for (i, env) in envelopes.iter().enumerate() {
            assert_eq!(env.account_id(), id);
            assert_eq!(env.sequence_number(), i as u64 + 1);
            assert_eq!(env.payload(), &account.history()[i]);
        }
        assert_eq!(envelopes[0].event_type(), "ledger.account.initial_deposit");
        assert_eq!(*account.id(), id);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Deposit(i64),
        Withdraw(i64),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            (-10_000i64..100_000).prop_map(Action::Deposit),
            (-10_000i64..200_000).prop_map(Action::Withdraw),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a plain account never goes negative, and every call adds exactly one record.
        #[test]
        fn plain_account_invariants(
            initial in 0i64..100_000,
            actions in prop::collection::vec(action(), 0..40)
        ) {
            let mut account = Account::new("P", cents(initial)).unwrap();
            let base = usize::from(initial > 0);
            prop_assert_eq!(account.history().len(), base);

            for (n, a) in actions.iter().enumerate() {
                let before = account.balance();
                match *a {
                    Action::Deposit(v) => {
                        let amount = cents(v);
                        let ok = account.deposit(amount);
                        prop_assert_eq!(ok, amount >= Money::ZERO);
                        let expected = if ok { before + amount } else { before };
                        prop_assert_eq!(account.balance(), expected);
                    }
                    Action::Withdraw(v) => {
                        let amount = cents(v);
                        let ok = account.withdraw(amount);
                        prop_assert_eq!(ok, amount > Money::ZERO && amount <= before);
                        let expected = if ok { before - amount } else { before };
                        prop_assert_eq!(account.balance(), expected);
                    }
                }
                prop_assert!(account.balance() >= Money::ZERO);
                prop_assert_eq!(account.history().len(), base + n + 1);
                prop_assert_eq!(account.last_operation().unwrap().balance_after, account.balance());
            }
        }

        /// Property: a credit account stays above its floor and credit figures stay consistent.
        #[test]
        fn credit_account_invariants(
            initial in 0i64..100_000,
            limit in 0i64..100_000,
            actions in prop::collection::vec(action(), 0..40)
        ) {
            let limit = cents(limit);
            let mut account = Account::with_credit("C", cents(initial), limit).unwrap();

            for a in &actions {
                let before = account.balance();
                if let Action::Withdraw(v) = *a {
                    let amount = cents(v);
                    let ok = account.withdraw(amount);
                    prop_assert_eq!(ok, amount > Money::ZERO && amount <= before + limit);
                    if ok {
                        prop_assert_eq!(account.balance(), before - amount);
                        let funds = account.last_operation().unwrap().funds_type;
                        prop_assert_eq!(funds, Some(FundsType::classify(before, amount)));
                    }
                } else if let Action::Deposit(v) = *a {
                    account.deposit(cents(v));
                }

                let balance = account.balance();
                prop_assert!(balance >= -limit);
                prop_assert_eq!(account.available_credit(), Some(balance + limit));
                let used = if balance < Money::ZERO { -balance } else { Money::ZERO };
                prop_assert_eq!(account.used_credit(), Some(used));
            }
        }
    }
}
