//! Account balance projections.
//!
//! Balances are derived from entries, never stored on the account itself.
//! Totals accumulate through `Money::add`, so an entry in the wrong
//! currency is rejected instead of silently mixed in.

use finledger_shared::types::{AccountId, Currency, Money, MoneyError};
use serde::Serialize;

use super::account::AccountType;
use super::entry::{EntrySide, LedgerEntry};

/// Debit and credit totals for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    account_id: AccountId,
    debit_total: Money,
    credit_total: Money,
}

impl AccountBalance {
    /// Creates an empty balance for the account, with zero totals in
    /// `currency`.
    #[must_use]
    pub fn new(account_id: AccountId, currency: Currency) -> Self {
        Self {
            account_id,
            debit_total: Money::zero(currency),
            credit_total: Money::zero(currency),
        }
    }

    /// Projects a balance from an entry sequence, keeping only entries
    /// that post against `account_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if a matching entry does
    /// not carry `currency`.
    pub fn project(
        account_id: AccountId,
        currency: Currency,
        entries: &[LedgerEntry],
    ) -> Result<Self, MoneyError> {
        let mut balance = Self::new(account_id, currency);
        for entry in entries.iter().filter(|e| e.account_id() == account_id) {
            balance.apply(entry)?;
        }
        Ok(balance)
    }

    /// The account this balance belongs to.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Sum of all debit entries applied so far.
    #[must_use]
    pub const fn debit_total(&self) -> Money {
        self.debit_total
    }

    /// Sum of all credit entries applied so far.
    #[must_use]
    pub const fn credit_total(&self) -> Money {
        self.credit_total
    }

    /// Accumulates one entry into the side it posts on.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the entry's currency
    /// differs from the balance's; the totals are then unchanged.
    pub fn apply(&mut self, entry: &LedgerEntry) -> Result<(), MoneyError> {
        match entry.side() {
            EntrySide::Debit => self.debit_total = self.debit_total.add(&entry.amount())?,
            EntrySide::Credit => self.credit_total = self.credit_total.add(&entry.amount())?,
        }
        Ok(())
    }

    /// Net balance signed from the account type's normal side: debit-normal
    /// accounts grow with debits, credit-normal accounts with credits.
    ///
    /// # Errors
    ///
    /// Unreachable for balances built through [`AccountBalance::apply`];
    /// the totals always share one currency.
    pub fn net(&self, account_type: AccountType) -> Result<Money, MoneyError> {
        match account_type.normal_balance_side() {
            EntrySide::Debit => self.debit_total.add(&self.credit_total.negate()),
            EntrySide::Credit => self.credit_total.add(&self.debit_total.negate()),
        }
    }
}
