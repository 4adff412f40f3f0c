//! Invariant validation for new ledger entries.
//!
//! Pure functions that vet a candidate entry against a sequence of existing
//! entries. Rules run cheapest-first and short-circuit on the first failure,
//! and every failure is a distinct variant so callers can tell "duplicate"
//! apart from "wrong currency" when translating for an upstream caller.

use chrono::{DateTime, Utc};
use finledger_shared::types::{Currency, LedgerEntryId, Money};
use thiserror::Error;

use super::entry::LedgerEntry;

/// A rejected candidate entry, by rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Candidate currency differs from the existing entries' currency.
    #[error("All entries must use the same currency (expected {expected}, got {found})")]
    CurrencyInconsistency {
        /// Currency established by the existing entries.
        expected: Currency,
        /// Currency of the candidate.
        found: Currency,
    },

    /// Candidate id collides with an existing entry id.
    #[error("Duplicate ledger entry ID: {0}")]
    DuplicateEntryId(LedgerEntryId),

    /// Candidate is dated after the validation instant.
    #[error("Entry timestamp {occurred_at} is after the validation time {now}")]
    FutureTimestamp {
        /// The candidate's business timestamp.
        occurred_at: DateTime<Utc>,
        /// The validation instant.
        now: DateTime<Utc>,
    },

    /// Accepting the candidate would take the running balance below zero.
    #[error("Running balance would become negative: {resulting}")]
    NegativeBalance {
        /// The balance after the candidate, had it been accepted.
        resulting: Money,
    },
}

impl InvariantViolation {
    /// Returns the error code for upstream API mapping.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CurrencyInconsistency { .. } => "CURRENCY_INCONSISTENCY",
            Self::DuplicateEntryId(_) => "DUPLICATE_ENTRY_ID",
            Self::FutureTimestamp { .. } => "FUTURE_TIMESTAMP",
            Self::NegativeBalance { .. } => "NEGATIVE_BALANCE",
        }
    }
}

/// Whether the running-balance rule applies to a ledger.
///
/// The non-negative running balance is domain policy, not a double-entry
/// law: in full double-entry postings both sides are positive contributions
/// to different totals, while a single-balance ledger (a cash drawer, say)
/// tracks one signed running sum that must stay at or above zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalancePolicy {
    /// Full double-entry semantics; no running-balance constraint.
    #[default]
    DoubleEntry,
    /// Single running balance that must never go negative.
    NonNegativeRunning,
}

/// Validates a candidate entry against the entries already accepted.
///
/// Runs, in order, short-circuiting on the first failure:
/// 1. same currency as the existing entries
/// 2. no duplicate entry id
/// 3. no future timestamp (against `now`, read once by the caller)
/// 4. non-negative running balance, only under
///    [`BalancePolicy::NonNegativeRunning`]
///
/// # Errors
///
/// Returns the specific [`InvariantViolation`] for the first rule that
/// fails. The candidate and `existing` are never modified.
pub fn validate_new_entry(
    candidate: &LedgerEntry,
    existing: &[LedgerEntry],
    now: DateTime<Utc>,
    policy: BalancePolicy,
) -> Result<(), InvariantViolation> {
    ensure_same_currency(candidate, existing)?;
    ensure_no_duplicate_id(candidate, existing)?;
    ensure_no_future_timestamp(candidate, now)?;
    if policy == BalancePolicy::NonNegativeRunning {
        ensure_non_negative_balance(candidate, existing)?;
    }
    Ok(())
}

/// Ensures the candidate uses the same currency as the existing entries.
/// Vacuously true when `existing` is empty.
///
/// # Errors
///
/// Returns [`InvariantViolation::CurrencyInconsistency`] on mismatch.
pub fn ensure_same_currency(
    candidate: &LedgerEntry,
    existing: &[LedgerEntry],
) -> Result<(), InvariantViolation> {
    if let Some(first) = existing.first() {
        let expected = first.amount().currency();
        let found = candidate.amount().currency();
        if expected != found {
            return Err(InvariantViolation::CurrencyInconsistency { expected, found });
        }
    }
    Ok(())
}

/// Ensures the candidate's id is not already present.
///
/// # Errors
///
/// Returns [`InvariantViolation::DuplicateEntryId`] on collision.
pub fn ensure_no_duplicate_id(
    candidate: &LedgerEntry,
    existing: &[LedgerEntry],
) -> Result<(), InvariantViolation> {
    if existing.iter().any(|entry| entry.id() == candidate.id()) {
        return Err(InvariantViolation::DuplicateEntryId(candidate.id()));
    }
    Ok(())
}

/// Ensures the candidate is not dated after the validation instant.
///
/// # Errors
///
/// Returns [`InvariantViolation::FutureTimestamp`] for future-dated entries.
pub fn ensure_no_future_timestamp(
    candidate: &LedgerEntry,
    now: DateTime<Utc>,
) -> Result<(), InvariantViolation> {
    if candidate.occurred_at() > now {
        return Err(InvariantViolation::FutureTimestamp {
            occurred_at: candidate.occurred_at(),
            now,
        });
    }
    Ok(())
}

/// Ensures the running balance (existing amounts plus the candidate's)
/// stays at or above zero. Only meaningful for single-balance ledgers;
/// see [`BalancePolicy`].
///
/// # Errors
///
/// Returns [`InvariantViolation::NegativeBalance`] when the sum is
/// negative, or [`InvariantViolation::CurrencyInconsistency`] if the
/// entries do not share one currency.
pub fn ensure_non_negative_balance(
    candidate: &LedgerEntry,
    existing: &[LedgerEntry],
) -> Result<(), InvariantViolation> {
    let expected = candidate.amount().currency();
    let mut balance = Money::zero(expected);
    for entry in existing.iter().chain(std::iter::once(candidate)) {
        // The only way the sum can fail is a currency mix within `existing`.
        balance = balance.add(&entry.amount()).map_err(|_| {
            InvariantViolation::CurrencyInconsistency {
                expected,
                found: entry.amount().currency(),
            }
        })?;
    }

    if balance.is_negative() {
        return Err(InvariantViolation::NegativeBalance { resulting: balance });
    }
    Ok(())
}
