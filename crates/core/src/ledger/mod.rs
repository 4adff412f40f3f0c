//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Account aggregates with lifecycle control (open/frozen/closed)
//! - Ledger entries (debits and credits)
//! - Invariant validation for new entries
//! - Transaction aggregates with atomic posting and reversal
//! - Account balance projections
//! - The posting gate that vets entries against account history
//! - Error types for ledger operations

pub mod account;
pub mod balance;
pub mod entry;
pub mod error;
pub mod service;
pub mod transaction;
pub mod validation;

#[cfg(test)]
mod transaction_props;
#[cfg(test)]
mod validation_props;

pub use account::{Account, AccountStatus, AccountType};
pub use balance::AccountBalance;
pub use entry::{EntrySide, LedgerEntry};
pub use error::LedgerError;
pub use service::PostingGate;
pub use transaction::{Transaction, TransactionStatus};
pub use validation::{BalancePolicy, InvariantViolation, validate_new_entry};
