//! Posting gate: validates a candidate entry against an account and its
//! posting history before anything is persisted.
//!
//! This is the seam between the core and its external collaborators. The
//! account repository and the entry-history source are injected as plain
//! functions; the gate itself performs no I/O and holds no state.

use chrono::{DateTime, Utc};
use finledger_shared::types::AccountId;
use tracing::{debug, instrument, warn};

use super::account::Account;
use super::entry::LedgerEntry;
use super::error::LedgerError;
use super::validation::{BalancePolicy, validate_new_entry};

/// Stateless gate that every entry must pass before persistence.
pub struct PostingGate;

impl PostingGate {
    /// Vets `entry` for posting: resolves the account, checks it accepts
    /// postings, then runs the ledger invariants against the account's
    /// existing entries.
    ///
    /// `now` is the validation instant, read once by the caller from its
    /// clock. `account_lookup` is the external account repository;
    /// `history` is the external entry-history source. `policy` selects
    /// whether the running-balance rule applies to this ledger.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] (from the lookup),
    /// [`LedgerError::AccountNotPostable`] for frozen or closed accounts,
    /// or the specific invariant violation from validation.
    #[instrument(
        skip_all,
        fields(entry_id = %entry.id(), account_id = %entry.account_id())
    )]
    pub fn validate_posting<A, H>(
        entry: &LedgerEntry,
        now: DateTime<Utc>,
        policy: BalancePolicy,
        account_lookup: A,
        history: H,
    ) -> Result<(), LedgerError>
    where
        A: Fn(AccountId) -> Result<Account, LedgerError>,
        H: Fn(AccountId) -> Result<Vec<LedgerEntry>, LedgerError>,
    {
        let account = account_lookup(entry.account_id())?;
        if let Err(err) = account.ensure_can_post() {
            warn!(status = %account.status(), "account cannot accept postings");
            return Err(err);
        }

        let existing = history(entry.account_id())?;
        validate_new_entry(entry, &existing, now, policy)?;

        debug!(existing = existing.len(), "entry passed posting validation");
        Ok(())
    }
}
