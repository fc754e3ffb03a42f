//! Monetary amounts.

use rust_decimal::Decimal;

/// Signed exact decimal amount used for balances, limits and operation amounts.
pub type Money = Decimal;

/// `max(-balance, 0)`: the part of a balance that sits below zero.
pub fn negative_part(balance: Money) -> Money {
    if balance.is_sign_negative() && !balance.is_zero() {
        -balance
    } else {
        Money::ZERO
    }
}
