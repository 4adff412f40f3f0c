//! Account aggregate and lifecycle state machine.

use finledger_shared::types::AccountId;
use serde::{Deserialize, Serialize};

use super::entry::EntrySide;
use super::error::LedgerError;

/// Accounting classification of an account.
///
/// Each type has a normal balance side, the entry side that increases it:
/// - Asset, Expense: increase with DEBIT
/// - Liability, Equity, Revenue: increase with CREDIT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, receivables, inventory).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// Returns the entry side that increases this account type.
    #[must_use]
    pub const fn normal_balance_side(self) -> EntrySide {
        match self {
            Self::Asset | Self::Expense => EntrySide::Debit,
            Self::Liability | Self::Equity | Self::Revenue => EntrySide::Credit,
        }
    }

    /// Returns true if applying `side` increases this account type's balance.
    #[must_use]
    pub fn increases_with(self, side: EntrySide) -> bool {
        self.normal_balance_side() == side
    }
}

/// Lifecycle status of an account, gating whether postings are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Postings allowed.
    Open,
    /// Postings temporarily blocked.
    Frozen,
    /// Postings permanently blocked.
    Closed,
}

impl AccountStatus {
    /// Returns true if an account in this status accepts postings.
    #[must_use]
    pub fn is_postable(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Frozen => write!(f, "frozen"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// A ledger account: identity, accounting type, and lifecycle status.
///
/// Accounts start `Open`. The lifecycle is one-directional: an open account
/// can be frozen or closed; a frozen account can be re-frozen (no-op) but
/// not closed; a closed account cannot be frozen. Any failed transition
/// leaves the aggregate unchanged.
///
/// Entries reference accounts by [`AccountId`]; the account itself owns no
/// entry data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: AccountId,
    name: String,
    account_type: AccountType,
    status: AccountStatus,
}

impl Account {
    /// Creates a new open account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAccountName`] if `name` is empty or
    /// only whitespace.
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Result<Self, LedgerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::InvalidAccountName);
        }
        Ok(Self {
            id,
            name,
            account_type,
            status: AccountStatus::Open,
        })
    }

    /// Unique identifier of this account.
    #[must_use]
    pub const fn id(&self) -> AccountId {
        self.id
    }

    /// Human-readable account name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accounting classification.
    #[must_use]
    pub const fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> AccountStatus {
        self.status
    }

    /// Freezes the account, blocking postings until further notice.
    /// Freezing a frozen account is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidStateTransition`] if the account is
    /// closed.
    pub fn freeze(&mut self) -> Result<(), LedgerError> {
        if self.status == AccountStatus::Closed {
            return Err(LedgerError::InvalidStateTransition {
                from: AccountStatus::Closed,
                to: AccountStatus::Frozen,
            });
        }
        self.status = AccountStatus::Frozen;
        Ok(())
    }

    /// Closes the account permanently.
    ///
    /// A frozen account cannot be closed directly; it must be reasoned
    /// about explicitly first. This asymmetry is deliberate and preserved.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidStateTransition`] if the account is
    /// frozen.
    pub fn close(&mut self) -> Result<(), LedgerError> {
        if self.status == AccountStatus::Frozen {
            return Err(LedgerError::InvalidStateTransition {
                from: AccountStatus::Frozen,
                to: AccountStatus::Closed,
            });
        }
        self.status = AccountStatus::Closed;
        Ok(())
    }

    /// Checks that this account can accept a posting right now.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotPostable`] unless the account is
    /// open.
    pub fn ensure_can_post(&self) -> Result<(), LedgerError> {
        if !self.status.is_postable() {
            return Err(LedgerError::AccountNotPostable(self.status));
        }
        Ok(())
    }
}
