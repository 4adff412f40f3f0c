//! Ledger entry domain types.

use chrono::{DateTime, Utc};
use finledger_shared::types::{AccountId, LedgerEntryId, Money};
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Side of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    /// Debit entry (increases assets/expenses, decreases liabilities/equity/revenue).
    Debit,
    /// Credit entry (decreases assets/expenses, increases liabilities/equity/revenue).
    Credit,
}

impl EntrySide {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// A single debit or credit against one account.
///
/// Entries are immutable value records: identity is the entry id, equality
/// is structural over all fields. Construction goes through
/// [`LedgerEntry::new`], which rejects entries dated after the supplied
/// validation instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    id: LedgerEntryId,
    account_id: AccountId,
    amount: Money,
    occurred_at: DateTime<Utc>,
    side: EntrySide,
}

impl LedgerEntry {
    /// Creates a new ledger entry.
    ///
    /// `now` is the validation instant, read once by the caller from its
    /// clock; `occurred_at` must not be strictly after it.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EntryInFuture`] if `occurred_at > now`.
    pub fn new(
        id: LedgerEntryId,
        account_id: AccountId,
        amount: Money,
        occurred_at: DateTime<Utc>,
        side: EntrySide,
        now: DateTime<Utc>,
    ) -> Result<Self, LedgerError> {
        if occurred_at > now {
            return Err(LedgerError::EntryInFuture { occurred_at, now });
        }
        Ok(Self {
            id,
            account_id,
            amount,
            occurred_at,
            side,
        })
    }

    /// Unique identifier of this entry.
    #[must_use]
    pub const fn id(&self) -> LedgerEntryId {
        self.id
    }

    /// The account this entry posts against.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// The entry amount.
    #[must_use]
    pub const fn amount(&self) -> Money {
        self.amount
    }

    /// When the underlying business event occurred.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Whether this is a debit or a credit.
    #[must_use]
    pub const fn side(&self) -> EntrySide {
        self.side
    }

    /// Returns the amount signed by side (positive for debit, negated for
    /// credit). Useful for net-movement projections over entry sequences.
    #[must_use]
    pub fn signed_amount(&self) -> Money {
        match self.side {
            EntrySide::Debit => self.amount,
            EntrySide::Credit => self.amount.negate(),
        }
    }
}
