//! Balance: the derived income/expense/difference triple
//!
//! Balances are never persisted. They are recomputed from a set of
//! transactions whenever they are needed.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

use super::money::Money;
use super::transaction::{Transaction, TransactionType};

/// Income total, expense total and their difference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Balance {
    pub income: Money,
    pub expense: Money,
    /// Always `income - expense`
    pub balance: Money,
}

impl Balance {
    /// A zero balance
    pub const fn zero() -> Self {
        Self {
            income: Money::zero(),
            expense: Money::zero(),
            balance: Money::zero(),
        }
    }

    /// Build a balance from totals
    pub fn new(income: Money, expense: Money) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// Accumulate one transaction
    ///
    /// Anything that is not income counts as expense.
    pub fn record(&mut self, txn: &Transaction) {
        match txn.transaction_type {
            TransactionType::Income => self.income += txn.amount,
            TransactionType::Expense => self.expense += txn.amount,
        }
        self.balance = self.income - self.expense;
    }

    /// Check whether nothing has been recorded
    pub fn is_zero(&self) -> bool {
        self.income.is_zero() && self.expense.is_zero()
    }

    /// Total for one side
    pub fn total(&self, transaction_type: TransactionType) -> Money {
        match transaction_type {
            TransactionType::Income => self.income,
            TransactionType::Expense => self.expense,
        }
    }
}

impl Add for Balance {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.income + other.income, self.expense + other.expense)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::iter::Sum for Balance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Balance::zero(), |acc, b| acc + b)
    }
}
