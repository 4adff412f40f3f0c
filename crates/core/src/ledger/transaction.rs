//! Transaction aggregate and its unposted/posted state machine.

use chrono::{DateTime, Utc};
use finledger_shared::types::{Currency, LedgerEntryId, Money, TransactionId};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

use super::entry::{EntrySide, LedgerEntry};
use super::error::LedgerError;
use super::validation::{BalancePolicy, validate_new_entry};

/// Lifecycle status of a transaction.
///
/// `Unposted` is the initial state; `Posted` is terminal. There is no
/// rollback from `Posted` - undoing a posted transaction means posting a
/// reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Entries may still be appended.
    Unposted,
    /// Finalized and immutable.
    Posted,
}

impl TransactionStatus {
    /// Returns true if the transaction has been posted.
    #[must_use]
    pub fn is_posted(&self) -> bool {
        matches!(self, Self::Posted)
    }

    /// Returns true if entries may still be appended.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Unposted)
    }
}

/// A financial transaction: an ordered, append-only sequence of entries
/// that must balance (total debits = total credits) to be posted.
///
/// The transaction exclusively owns its entries; no entry is shared across
/// transactions. Accounts are referenced by id from the entries, never
/// embedded. Every operation either fully succeeds or leaves the aggregate
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    description: String,
    created_at: DateTime<Utc>,
    entries: Vec<LedgerEntry>,
    status: TransactionStatus,
}

impl Transaction {
    /// Creates a new unposted transaction with no entries.
    #[must_use]
    pub fn new(id: TransactionId, description: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            description: description.into(),
            created_at,
            entries: Vec::new(),
            status: TransactionStatus::Unposted,
        }
    }

    /// Unique identifier of this transaction.
    #[must_use]
    pub const fn id(&self) -> TransactionId {
        self.id
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// When the transaction was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Returns true if the transaction has been posted.
    #[must_use]
    pub fn is_posted(&self) -> bool {
        self.status.is_posted()
    }

    /// Currency shared by all entries, or `None` while the transaction is
    /// empty. The same-currency invariant makes the first entry
    /// authoritative.
    #[must_use]
    pub fn currency(&self) -> Option<Currency> {
        self.entries.first().map(|entry| entry.amount().currency())
    }

    /// Appends an entry after re-validating the ledger invariants against
    /// the entries already in this transaction.
    ///
    /// `now` is the validation instant, read once by the caller from its
    /// clock. Cross-transaction validation against full account history is
    /// the posting gate's job, before this layer is reached.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionPosted`] if the transaction has
    /// been posted, or the specific [`InvariantViolation`] for the first
    /// rule the entry breaks. On failure the entry sequence is unchanged.
    ///
    /// [`InvariantViolation`]: super::validation::InvariantViolation
    pub fn add_entry(&mut self, entry: LedgerEntry, now: DateTime<Utc>) -> Result<(), LedgerError> {
        if self.status.is_posted() {
            return Err(LedgerError::TransactionPosted);
        }
        validate_new_entry(&entry, &self.entries, now, BalancePolicy::DoubleEntry)?;
        self.entries.push(entry);
        Ok(())
    }

    /// Total of all debit entries, or `None` while the transaction is empty.
    ///
    /// # Errors
    ///
    /// Propagates a currency mismatch from the fold; unreachable for
    /// transactions built through [`Transaction::add_entry`].
    pub fn total_debits(&self) -> Result<Option<Money>, LedgerError> {
        self.side_total(EntrySide::Debit)
    }

    /// Total of all credit entries, or `None` while the transaction is empty.
    ///
    /// # Errors
    ///
    /// Propagates a currency mismatch from the fold; unreachable for
    /// transactions built through [`Transaction::add_entry`].
    pub fn total_credits(&self) -> Result<Option<Money>, LedgerError> {
        self.side_total(EntrySide::Credit)
    }

    /// Sums the entries on `side` via `Money::add`, starting from zero in
    /// the transaction's currency.
    fn side_total(&self, side: EntrySide) -> Result<Option<Money>, LedgerError> {
        let Some(currency) = self.currency() else {
            return Ok(None);
        };
        let mut total = Money::zero(currency);
        for entry in self.entries.iter().filter(|entry| entry.side() == side) {
            total = total.add(&entry.amount())?;
        }
        Ok(Some(total))
    }

    /// Posts the transaction, making it permanently immutable.
    ///
    /// An empty transaction is vacuously balanced. Posting an already
    /// posted transaction re-checks the balance and is otherwise a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnbalancedTransaction`] if total debits do
    /// not equal total credits; the transaction then stays unposted.
    pub fn post(&mut self) -> Result<(), LedgerError> {
        if let (Some(debits), Some(credits)) = (self.total_debits()?, self.total_credits()?) {
            if debits != credits {
                return Err(LedgerError::UnbalancedTransaction { debits, credits });
            }
        }
        self.status = TransactionStatus::Posted;
        Ok(())
    }

    /// Builds and posts the reversal of this transaction.
    ///
    /// Each original entry is mirrored with a fresh id from
    /// `next_entry_id`, the same account and amount, `now` as its
    /// timestamp, and the opposite side. Mirrored entries go through
    /// [`Transaction::add_entry`], so the ledger invariants re-apply to
    /// the reversal's own entry set before it is posted.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotPosted`] unless this
    /// transaction is posted.
    pub fn reverse_with<F>(
        &self,
        new_id: TransactionId,
        now: DateTime<Utc>,
        mut next_entry_id: F,
    ) -> Result<Self, LedgerError>
    where
        F: FnMut() -> LedgerEntryId,
    {
        if !self.status.is_posted() {
            return Err(LedgerError::TransactionNotPosted);
        }

        let mut reversal = Self::new(new_id, format!("Reversal of: {}", self.description), now);
        for entry in &self.entries {
            let mirrored = LedgerEntry::new(
                next_entry_id(),
                entry.account_id(),
                entry.amount(),
                now,
                entry.side().opposite(),
                now,
            )?;
            reversal.add_entry(mirrored, now)?;
        }
        reversal.post()?;
        Ok(reversal)
    }

    /// Builds and posts the reversal under a freshly generated transaction
    /// id, with entry timestamps from `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotPosted`] unless this
    /// transaction is posted.
    pub fn reverse(&self, clock: &dyn Clock) -> Result<Self, LedgerError> {
        self.reverse_with(TransactionId::new(), clock.now(), LedgerEntryId::new)
    }
}
