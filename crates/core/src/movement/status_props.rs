//! Property-based tests for status transitions and overdue derivation.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use super::status::StatusEngine;
use super::types::MovementStatus;

fn status() -> impl Strategy<Value = MovementStatus> {
    prop::sample::select(MovementStatus::ALL.to_vec())
}

fn date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|days| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(days))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every accepted transition is one `is_valid_transition` allows.
    #[test]
    fn prop_actions_agree_with_transition_table(from in status(), on in date()) {
        match StatusEngine::mark_paid(from, on) {
            Ok(patch) => {
                prop_assert!(StatusEngine::is_valid_transition(from, patch.status));
                prop_assert_eq!(patch.payment_date, Some(on));
            }
            Err(_) => prop_assert!(!StatusEngine::is_valid_transition(from, MovementStatus::Paid)),
        }
        match StatusEngine::cancel(from) {
            Ok(patch) => {
                prop_assert!(StatusEngine::is_valid_transition(from, patch.status));
                prop_assert_eq!(patch.payment_date, None);
            }
            Err(_) => prop_assert!(!StatusEngine::is_valid_transition(from, MovementStatus::Cancelled)),
        }
    }

    /// Terminal statuses never change.
    #[test]
    fn prop_terminal_statuses_reject_every_action(on in date()) {
        for from in [MovementStatus::Paid, MovementStatus::Cancelled] {
            prop_assert!(StatusEngine::mark_paid(from, on).is_err());
            prop_assert!(StatusEngine::cancel(from).is_err());
        }
    }

    /// Overdue is exactly "open and due before today".
    #[test]
    fn prop_effective_status_overdue_iff_open_and_past_due(
        stored in status(),
        due in date(),
        today in date(),
    ) {
        let effective = StatusEngine::effective_status(stored, due, today);
        let expected_overdue = stored.is_open() && due < today;
        prop_assert_eq!(effective == MovementStatus::Overdue, expected_overdue);
        if stored.is_terminal() {
            prop_assert_eq!(effective, stored);
        }
    }
}
