//! Shared value types for finledger.
//!
//! This crate provides the common types used across all other crates:
//! - Money types with decimal precision and currency
//! - Typed IDs for type-safe entity references
//!
//! Everything here is a plain immutable value: safe to copy, share, and
//! compare across threads without synchronization.

pub mod types;

pub use types::{AccountId, Currency, LedgerEntryId, Money, MoneyError, TransactionId};
