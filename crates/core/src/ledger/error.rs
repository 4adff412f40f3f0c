//! Ledger error types for validation and state errors.
//!
//! Every failure is surfaced synchronously to the immediate caller as a
//! typed variant; nothing is retried or swallowed inside the core, and a
//! failed operation never leaves partial mutation behind.

use chrono::{DateTime, Utc};
use finledger_shared::types::{AccountId, Money, MoneyError};
use thiserror::Error;

use super::account::AccountStatus;
use super::validation::InvariantViolation;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Account Errors ==========
    /// Account name must not be empty or blank.
    #[error("Account name cannot be empty")]
    InvalidAccountName,

    /// Requested lifecycle transition is not allowed.
    #[error("Cannot transition account from {from} to {to}")]
    InvalidStateTransition {
        /// Current status.
        from: AccountStatus,
        /// Requested status.
        to: AccountStatus,
    },

    /// Account does not accept postings in its current status.
    #[error("Cannot post to account with status {0}")]
    AccountNotPostable(AccountStatus),

    /// Account not found by the repository collaborator.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    // ========== Entry Errors ==========
    /// Entry is dated after the validation instant.
    #[error("Entry cannot occur in the future ({occurred_at} is after {now})")]
    EntryInFuture {
        /// The entry's business timestamp.
        occurred_at: DateTime<Utc>,
        /// The validation instant.
        now: DateTime<Utc>,
    },

    // ========== Transaction State Errors ==========
    /// Cannot add entries to a posted transaction.
    #[error("Cannot add entry to a posted transaction")]
    TransactionPosted,

    /// Only posted transactions can be reversed.
    #[error("Cannot reverse an unposted transaction")]
    TransactionNotPosted,

    /// Total debits do not equal total credits.
    #[error("Transaction is not balanced. Debits: {debits}, Credits: {credits}")]
    UnbalancedTransaction {
        /// Sum of all debit entries.
        debits: Money,
        /// Sum of all credit entries.
        credits: Money,
    },

    // ========== Wrapped Errors ==========
    /// A ledger invariant was violated.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    /// A money construction or arithmetic rule was violated.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl LedgerError {
    /// Returns the error code for upstream API mapping.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAccountName => "INVALID_ACCOUNT_NAME",
            Self::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            Self::AccountNotPostable(_) => "ACCOUNT_NOT_POSTABLE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::EntryInFuture { .. } => "ENTRY_IN_FUTURE",
            Self::TransactionPosted => "TRANSACTION_ALREADY_POSTED",
            Self::TransactionNotPosted => "TRANSACTION_NOT_POSTED",
            Self::UnbalancedTransaction { .. } => "UNBALANCED_TRANSACTION",
            Self::Invariant(violation) => violation.error_code(),
            Self::Money(MoneyError::InvalidAmount { .. }) => "INVALID_AMOUNT",
            Self::Money(MoneyError::CurrencyMismatch { .. }) => "CURRENCY_MISMATCH",
        }
    }
}
