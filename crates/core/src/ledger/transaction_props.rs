//! Property-based tests for transaction posting and reversal.

use chrono::{DateTime, TimeZone, Utc};
use finledger_shared::types::{AccountId, Currency, LedgerEntryId, Money, TransactionId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::{EntrySide, LedgerEntry};
use super::error::LedgerError;
use super::transaction::Transaction;

fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

fn usd_cents(units: i64) -> Money {
    Money::new(Decimal::new(units, 2), Currency::Usd).expect("cents are at canonical scale")
}

fn make_entry(amount: Money, side: EntrySide) -> LedgerEntry {
    LedgerEntry::new(
        LedgerEntryId::new(),
        AccountId::new(),
        amount,
        test_now(),
        side,
        test_now(),
    )
    .expect("entry at the validation instant is valid")
}

/// Builds a transaction with one debit and one credit per amount, so total
/// debits always equal total credits.
fn balanced_transaction(amounts: &[i64]) -> Transaction {
    let mut tx = Transaction::new(TransactionId::new(), "Generated", test_now());
    for &units in amounts {
        tx.add_entry(make_entry(usd_cents(units), EntrySide::Debit), test_now())
            .expect("debit leg accepted");
        tx.add_entry(make_entry(usd_cents(units), EntrySide::Credit), test_now())
            .expect("credit leg accepted");
    }
    tx
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* multiset of paired debit/credit amounts, posting SHALL
    /// succeed and the side totals SHALL agree.
    #[test]
    fn prop_balanced_transaction_posts(
        amounts in prop::collection::vec(1i64..1_000_000i64, 1..8),
    ) {
        let mut tx = balanced_transaction(&amounts);

        prop_assert_eq!(tx.total_debits().unwrap(), tx.total_credits().unwrap());
        prop_assert!(tx.post().is_ok());
        prop_assert!(tx.is_posted());
    }

    /// *For any* balanced transaction plus one extra single-sided entry,
    /// posting SHALL fail with `UnbalancedTransaction` and the transaction
    /// SHALL stay unposted.
    #[test]
    fn prop_unbalanced_transaction_never_posts(
        amounts in prop::collection::vec(1i64..1_000_000i64, 1..8),
        extra in 1i64..1_000_000i64,
        extra_side_bit in 0..2u8,
    ) {
        let mut tx = balanced_transaction(&amounts);
        let side = if extra_side_bit == 0 { EntrySide::Debit } else { EntrySide::Credit };
        tx.add_entry(make_entry(usd_cents(extra), side), test_now()).unwrap();

        let result = tx.post();
        prop_assert!(matches!(result, Err(LedgerError::UnbalancedTransaction { .. })), "expected UnbalancedTransaction");
        prop_assert!(!tx.is_posted());
    }

    /// After a successful post, *any* further entry SHALL be refused and
    /// the entry sequence SHALL be unchanged.
    #[test]
    fn prop_posted_transaction_is_immutable(
        amounts in prop::collection::vec(1i64..1_000_000i64, 1..5),
        late in 1i64..1_000_000i64,
    ) {
        let mut tx = balanced_transaction(&amounts);
        tx.post().unwrap();
        let before = tx.entries().to_vec();

        let result = tx.add_entry(make_entry(usd_cents(late), EntrySide::Debit), test_now());
        prop_assert!(matches!(result, Err(LedgerError::TransactionPosted)));
        prop_assert_eq!(tx.entries(), before.as_slice());
    }

    /// *For any* posted transaction, its reversal SHALL be posted, have
    /// the same length, and mirror each entry pairwise: same account and
    /// amount, opposite side, fresh id.
    #[test]
    fn prop_reversal_mirrors_pairwise(
        amounts in prop::collection::vec(1i64..1_000_000i64, 1..6),
    ) {
        let mut tx = balanced_transaction(&amounts);
        tx.post().unwrap();

        let reversal = tx
            .reverse_with(TransactionId::new(), test_now(), LedgerEntryId::new)
            .unwrap();

        prop_assert!(reversal.is_posted());
        prop_assert_eq!(reversal.entries().len(), tx.entries().len());
        for (original, mirrored) in tx.entries().iter().zip(reversal.entries()) {
            prop_assert_eq!(mirrored.account_id(), original.account_id());
            prop_assert_eq!(mirrored.amount(), original.amount());
            prop_assert_eq!(mirrored.side(), original.side().opposite());
            prop_assert_ne!(mirrored.id(), original.id());
        }
    }

    /// Reversing a reversal SHALL restore every entry's original side.
    #[test]
    fn prop_double_reversal_restores_sides(
        amounts in prop::collection::vec(1i64..1_000_000i64, 1..5),
    ) {
        let mut tx = balanced_transaction(&amounts);
        tx.post().unwrap();

        let reversal = tx
            .reverse_with(TransactionId::new(), test_now(), LedgerEntryId::new)
            .unwrap();
        let restored = reversal
            .reverse_with(TransactionId::new(), test_now(), LedgerEntryId::new)
            .unwrap();

        for (original, twice) in tx.entries().iter().zip(restored.entries()) {
            prop_assert_eq!(twice.side(), original.side());
            prop_assert_eq!(twice.amount(), original.amount());
        }
    }
}
