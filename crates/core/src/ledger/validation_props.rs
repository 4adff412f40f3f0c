//! Property-based tests for the entry invariant rules.

use chrono::{DateTime, Duration, TimeZone, Utc};
use finledger_shared::types::{AccountId, Currency, LedgerEntryId, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::{EntrySide, LedgerEntry};
use super::validation::{BalancePolicy, InvariantViolation, validate_new_entry};

fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

/// Strategy for any supported currency.
fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::Usd),
        Just(Currency::Eur),
        Just(Currency::Idr),
        Just(Currency::Sgd),
        Just(Currency::Jpy),
    ]
}

/// Strategy for an entry side.
fn side_strategy() -> impl Strategy<Value = EntrySide> {
    prop_oneof![Just(EntrySide::Debit), Just(EntrySide::Credit)]
}

/// Helper to build a valid entry dated at the test instant.
fn make_entry(id: LedgerEntryId, amount: Money, side: EntrySide) -> LedgerEntry {
    LedgerEntry::new(id, AccountId::new(), amount, test_now(), side, test_now())
        .expect("entry at the validation instant is valid")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* candidate whose id collides with an existing entry,
    /// validation SHALL reject it with `DuplicateEntryId`, regardless of
    /// amount, side, or currency.
    #[test]
    fn prop_duplicate_id_always_rejected(
        currency in currency_strategy(),
        side_a in side_strategy(),
        side_b in side_strategy(),
        seed_a in 1i64..1_000_000i64,
        seed_b in 1i64..1_000_000i64,
    ) {
        let amount_a = Money::new(
            Decimal::new(seed_a, currency.fraction_digits()),
            currency,
        ).unwrap();
        let amount_b = Money::new(
            Decimal::new(seed_b, currency.fraction_digits()),
            currency,
        ).unwrap();

        let id = LedgerEntryId::new();
        let existing = vec![make_entry(id, amount_a, side_a)];
        let candidate = make_entry(id, amount_b, side_b);

        let result = validate_new_entry(&candidate, &existing, test_now(), BalancePolicy::DoubleEntry);
        prop_assert_eq!(result, Err(InvariantViolation::DuplicateEntryId(id)));
    }

    /// *For any* pair of differing currencies, a candidate in the second
    /// currency SHALL be rejected with `CurrencyInconsistency` against a
    /// ledger opened in the first.
    #[test]
    fn prop_currency_mismatch_never_accepted(
        existing_currency in currency_strategy(),
        candidate_currency in currency_strategy(),
        existing_amount_seed in 1i64..1_000_000i64,
        candidate_amount_seed in 1i64..1_000_000i64,
    ) {
        prop_assume!(existing_currency != candidate_currency);

        let existing_amount = Money::new(
            Decimal::new(existing_amount_seed, existing_currency.fraction_digits()),
            existing_currency,
        ).unwrap();
        let candidate_amount = Money::new(
            Decimal::new(candidate_amount_seed, candidate_currency.fraction_digits()),
            candidate_currency,
        ).unwrap();

        let existing = vec![make_entry(LedgerEntryId::new(), existing_amount, EntrySide::Debit)];
        let candidate = make_entry(LedgerEntryId::new(), candidate_amount, EntrySide::Credit);

        let result = validate_new_entry(&candidate, &existing, test_now(), BalancePolicy::DoubleEntry);
        prop_assert_eq!(
            result,
            Err(InvariantViolation::CurrencyInconsistency {
                expected: existing_currency,
                found: candidate_currency,
            })
        );
    }

    /// *For any* entry dated after the validation instant, validation
    /// SHALL reject it with `FutureTimestamp`.
    #[test]
    fn prop_future_timestamp_always_rejected(
        currency in currency_strategy(),
        side in side_strategy(),
        ahead_secs in 1i64..1_000_000i64,
    ) {
        let occurred_at = test_now() + Duration::seconds(ahead_secs);
        let candidate = LedgerEntry::new(
            LedgerEntryId::new(),
            AccountId::new(),
            Money::zero(currency),
            occurred_at,
            side,
            occurred_at,
        ).unwrap();

        let result = validate_new_entry(&candidate, &[], test_now(), BalancePolicy::DoubleEntry);
        prop_assert!(matches!(
            result,
            Err(InvariantViolation::FutureTimestamp { .. })
        ), "expected FutureTimestamp");
    }

    /// *For any* sequence of unique same-currency entries, each next entry
    /// SHALL be accepted under double-entry policy.
    #[test]
    fn prop_unique_same_currency_entries_accepted(
        currency in currency_strategy(),
        seeds in prop::collection::vec((1i64..1_000_000i64, 0..2u8), 1..8),
    ) {
        let mut existing: Vec<LedgerEntry> = Vec::new();
        for (seed, side_bit) in seeds {
            let side = if side_bit == 0 { EntrySide::Debit } else { EntrySide::Credit };
            let amount = Money::new(
                Decimal::new(seed, currency.fraction_digits()),
                currency,
            ).unwrap();
            let candidate = make_entry(LedgerEntryId::new(), amount, side);

            let result = validate_new_entry(&candidate, &existing, test_now(), BalancePolicy::DoubleEntry);
            prop_assert!(result.is_ok(), "unexpected rejection: {:?}", result);
            existing.push(candidate);
        }
    }

    /// Under the running-balance policy, a candidate SHALL be accepted
    /// exactly when the sum of all amounts stays at or above zero.
    #[test]
    fn prop_running_balance_acceptance_matches_sum(
        deposits in prop::collection::vec(1i64..10_000i64, 1..6),
        withdrawal in 1i64..60_000i64,
    ) {
        let currency = Currency::Usd;
        let existing: Vec<LedgerEntry> = deposits
            .iter()
            .map(|&units| {
                make_entry(
                    LedgerEntryId::new(),
                    Money::new(Decimal::new(units, 2), currency).unwrap(),
                    EntrySide::Debit,
                )
            })
            .collect();

        let candidate = make_entry(
            LedgerEntryId::new(),
            Money::new(Decimal::new(-withdrawal, 2), currency).unwrap(),
            EntrySide::Debit,
        );

        let total: i64 = deposits.iter().sum::<i64>() - withdrawal;
        let result = validate_new_entry(
            &candidate,
            &existing,
            test_now(),
            BalancePolicy::NonNegativeRunning,
        );

        if total < 0 {
            prop_assert!(matches!(
                result,
                Err(InvariantViolation::NegativeBalance { .. })
            ), "expected NegativeBalance");
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
