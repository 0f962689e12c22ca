//! Property-based tests for installment expansion.
//!
//! - Shares always sum to the total rounded to the minimal unit
//! - Exactly N records, each at least one minimal unit
//! - Due dates stay anchored to the first due date's day-of-month

use bizdesk_shared::types::AccountId;
use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::allocation::{minimal_unit, round_to_unit};
use super::installments::expand_installments;
use super::types::{MovementType, ValidatedMovement};

/// Strategy to generate amounts from 0.001 to 1,000,000.000 with three decimals.
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|mills| Decimal::new(mills, 3))
}

/// Strategy to generate due dates across several years, including month ends.
fn due_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=31).prop_map(|(y, m, day)| {
        (1..=day)
            .rev()
            .find_map(|d| NaiveDate::from_ymd_opt(y, m, d))
            .unwrap()
    })
}

fn validated(value: Decimal, due_date: NaiveDate, installments: u32) -> ValidatedMovement {
    ValidatedMovement {
        movement_type: MovementType::Expense,
        description: "Plan".to_string(),
        value,
        due_date,
        account_id: AccountId::new(),
        destination_account_id: None,
        category_id: None,
        party_id: None,
        notes: None,
        payment_method: None,
        document: None,
        installments,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* value and N, the shares sum to the value rounded to the unit.
    #[test]
    fn prop_shares_sum_to_rounded_total(value in amount(), n in 1u32..=60, dp in 0u32..=3) {
        prop_assume!(round_to_unit(value, dp) >= minimal_unit(dp) * Decimal::from(n));
        let records = expand_installments(&validated(value, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), n), dp).unwrap();

        prop_assert_eq!(records.len(), n as usize);
        let sum: Decimal = records.iter().map(|r| r.value).sum();
        prop_assert_eq!(sum, round_to_unit(value, dp));
        prop_assert!((sum - value).abs() <= minimal_unit(dp));
    }

    /// *For any* plan, shares differ by at most one unit and larger ones come first.
    #[test]
    fn prop_shares_are_even_and_front_loaded(value in amount(), n in 2u32..=24) {
        prop_assume!(round_to_unit(value, 2) >= minimal_unit(2) * Decimal::from(n));
        let records = expand_installments(&validated(value, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), n), 2).unwrap();
        let values: Vec<Decimal> = records.iter().map(|r| r.value).collect();

        for pair in values.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
        prop_assert!(values[0] - values[values.len() - 1] <= minimal_unit(2));
        prop_assert!(values.iter().all(|v| *v >= minimal_unit(2)));
    }

    /// *For any* first due date, installment i is i months later with the
    /// day clamped only when the target month is shorter.
    #[test]
    fn prop_due_dates_anchor_on_first(start in due_date(), n in 1u32..=36) {
        let records = expand_installments(&validated(Decimal::from(1000), start, n), 2).unwrap();

        prop_assert_eq!(records[0].due_date, start);
        for (i, record) in records.iter().enumerate() {
            let due = record.due_date;
            let months = (due.year() - start.year()) * 12 + due.month() as i32 - start.month() as i32;
            prop_assert_eq!(months, i as i32);
            prop_assert!(due.day() <= start.day());
            if due.day() < start.day() {
                prop_assert!(due.succ_opt().unwrap().day() == 1);
            }
        }
    }

    /// *For any* N > 1, descriptions carry the position suffix.
    #[test]
    fn prop_descriptions_are_suffixed(n in 2u32..=24) {
        let records = expand_installments(&validated(Decimal::from(1000), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), n), 2).unwrap();
        for (i, record) in records.iter().enumerate() {
            let expected = format!("Plan ({}/{})", i + 1, n);
            prop_assert_eq!(&record.description, &expected);
        }
    }
}
