//! Tests for the reports module.

use bizdesk_shared::types::{AccountId, CategoryId, MovementId};
use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::ReportService;
use super::types::UNCATEGORIZED;
use crate::calendar::Period;
use crate::movement::{Movement, MovementStatus, MovementType};
use crate::records::{Account, AccountKind, Category, CategoryType, RecordStatus};
use crate::store::DateRange;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn movement(
    movement_type: MovementType,
    status: MovementStatus,
    value: Decimal,
    due_date: NaiveDate,
    payment_date: Option<NaiveDate>,
) -> Movement {
    let now = Utc::now();
    Movement {
        id: MovementId::new(),
        movement_type,
        description: "row".to_string(),
        value,
        due_date,
        payment_date,
        status,
        account_id: AccountId::new(),
        destination_account_id: None,
        category_id: None,
        party_id: None,
        installment: None,
        parent_movement_id: None,
        notes: None,
        payment_method: None,
        document: None,
        created_at: now,
        updated_at: now,
    }
}

fn paid(movement_type: MovementType, value: Decimal, on: NaiveDate) -> Movement {
    movement(movement_type, MovementStatus::Paid, value, on, Some(on))
}

fn pending(movement_type: MovementType, value: Decimal, due: NaiveDate) -> Movement {
    movement(movement_type, MovementStatus::Pending, value, due, None)
}

fn with_category(mut m: Movement, category_id: Option<CategoryId>) -> Movement {
    m.category_id = category_id;
    m
}

fn category(name: &str) -> Category {
    Category {
        id: CategoryId::new(),
        name: name.to_string(),
        category_type: CategoryType::Expense,
        status: RecordStatus::Active,
        description: None,
    }
}

fn account(balance: Decimal, status: RecordStatus) -> Account {
    Account {
        id: AccountId::new(),
        name: "acct".to_string(),
        kind: AccountKind::Cash,
        current_balance: balance,
        initial_balance: Decimal::ZERO,
        status,
        bank_name: None,
        branch: None,
        account_number: None,
    }
}

fn march_2024() -> Vec<Movement> {
    vec![
        paid(MovementType::Income, dec!(100), d(2024, 3, 5)),
        paid(MovementType::Expense, dec!(40), d(2024, 3, 20)),
        pending(MovementType::Income, dec!(50), d(2024, 3, 28)),
    ]
}

#[test]
fn test_march_period_totals() {
    let totals = ReportService::period_totals(&march_2024(), Period::month_of(d(2024, 3, 1)));
    assert_eq!(totals.income, dec!(100));
    assert_eq!(totals.expense, dec!(40));
    assert_eq!(totals.profit, dec!(60));
}

#[test]
fn test_march_outstanding_totals() {
    let totals = ReportService::outstanding_totals(&march_2024(), DateRange::unbounded(), d(2024, 3, 15));
    assert_eq!(totals.receivable, dec!(50));
    assert_eq!(totals.payable, dec!(0));
    assert_eq!(totals.overdue_count, 0);
}

#[test]
fn test_outstanding_counts_legacy_overdue_and_past_due() {
    let rows = vec![
        pending(MovementType::Expense, dec!(30), d(2024, 3, 1)),
        movement(MovementType::Expense, MovementStatus::Overdue, dec!(20), d(2024, 2, 1), None),
        pending(MovementType::Expense, dec!(5), d(2024, 4, 1)),
        movement(MovementType::Expense, MovementStatus::Cancelled, dec!(99), d(2024, 2, 1), None),
    ];
    let totals = ReportService::outstanding_totals(&rows, DateRange::unbounded(), d(2024, 3, 15));
    assert_eq!(totals.payable, dec!(55));
    assert_eq!(totals.overdue_payable, dec!(50));
    assert_eq!(totals.overdue_count, 2);

    let window = DateRange::from(Period::month_of(d(2024, 3, 1)));
    let totals = ReportService::outstanding_totals(&rows, window, d(2024, 3, 15));
    assert_eq!(totals.payable, dec!(30));
}

#[test]
fn test_payment_on_next_month_start_is_excluded() {
    let rows = vec![paid(MovementType::Income, dec!(10), d(2024, 4, 1))];
    let totals = ReportService::period_totals(&rows, Period::month_of(d(2024, 3, 1)));
    assert_eq!(totals.income, Decimal::ZERO);
}

#[test]
fn test_transfers_do_not_count() {
    let rows = vec![
        paid(MovementType::Transfer, dec!(500), d(2024, 3, 5)),
        pending(MovementType::Transfer, dec!(500), d(2024, 3, 5)),
    ];
    let totals = ReportService::period_totals(&rows, Period::month_of(d(2024, 3, 1)));
    assert_eq!(totals.income + totals.expense, Decimal::ZERO);
    let open = ReportService::outstanding_totals(&rows, DateRange::unbounded(), d(2024, 4, 1));
    assert_eq!(open.overdue_count, 0);
}

#[test]
fn test_empty_input_gives_zeros() {
    let totals = ReportService::period_totals(&[], Period::month_of(d(2024, 3, 1)));
    assert_eq!(totals.profit, Decimal::ZERO);

    let series = ReportService::monthly_series(&[], d(2024, 3, 15), 6);
    assert_eq!(series.len(), 6);
    assert!(series.iter().all(|b| b.income.is_zero() && b.expense.is_zero()));

    assert!(ReportService::category_breakdown(&[], &[], Period::month_of(d(2024, 3, 1))).is_empty());
    assert_eq!(ReportService::total_balance(&[]), Decimal::ZERO);
}

#[test]
fn test_monthly_series_is_oldest_first_and_crosses_year() {
    let rows = vec![
        paid(MovementType::Income, dec!(70), d(2023, 11, 30)),
        paid(MovementType::Expense, dec!(25), d(2024, 2, 1)),
    ];
    let series = ReportService::monthly_series(&rows, d(2024, 2, 14), 6);
    let labels: Vec<_> = series.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Sep 23", "Oct 23", "Nov 23", "Dec 23", "Jan 24", "Feb 24"]);
    assert_eq!(series[2].income, dec!(70));
    assert_eq!(series[5].expense, dec!(25));
    assert_eq!(series[5].profit, dec!(-25));
}

#[test]
fn test_category_breakdown_groups_and_labels() {
    let rent = category("Rent");
    let rows = vec![
        with_category(paid(MovementType::Expense, dec!(30), d(2024, 3, 2)), Some(rent.id)),
        with_category(paid(MovementType::Expense, dec!(20), d(2024, 3, 9)), Some(rent.id)),
        paid(MovementType::Expense, dec!(10), d(2024, 3, 12)),
        with_category(paid(MovementType::Income, dec!(900), d(2024, 3, 12)), Some(rent.id)),
        with_category(pending(MovementType::Expense, dec!(900), d(2024, 3, 12)), Some(rent.id)),
    ];
    let breakdown = ReportService::category_breakdown(&rows, &[rent.clone()], Period::month_of(d(2024, 3, 1)));

    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].label, "Rent");
    assert_eq!(breakdown[0].total, dec!(50));
    assert_eq!(breakdown[0].category_id, Some(rent.id));
    assert_eq!(breakdown[1].label, UNCATEGORIZED);
    assert_eq!(breakdown[1].total, dec!(10));
}

#[test]
fn test_category_breakdown_unknown_id_and_tie_order() {
    let unknown = CategoryId::new();
    let zeta = category("Zeta");
    let alpha = category("Alpha");
    let rows = vec![
        with_category(paid(MovementType::Expense, dec!(15), d(2024, 3, 2)), Some(zeta.id)),
        with_category(paid(MovementType::Expense, dec!(15), d(2024, 3, 2)), Some(alpha.id)),
        with_category(paid(MovementType::Expense, dec!(5), d(2024, 3, 2)), Some(unknown)),
    ];
    let breakdown = ReportService::category_breakdown(&rows, &[zeta, alpha], Period::month_of(d(2024, 3, 1)));
    let labels: Vec<_> = breakdown.iter().map(|c| c.label.clone()).collect();
    assert_eq!(labels, vec!["Alpha".to_string(), "Zeta".to_string(), unknown.to_string()]);
}

#[test]
fn test_running_balance_accumulates() {
    let rows = vec![
        paid(MovementType::Income, dec!(100), d(2024, 1, 10)),
        paid(MovementType::Expense, dec!(30), d(2024, 2, 10)),
        paid(MovementType::Income, dec!(5), d(2024, 3, 10)),
    ];
    let series = ReportService::monthly_series(&rows, d(2024, 3, 31), 3);
    let points = ReportService::running_balance(dec!(1000), &series);
    let balances: Vec<_> = points.iter().map(|p| p.balance).collect();
    assert_eq!(balances, vec![dec!(1100), dec!(1070), dec!(1075)]);
}

#[test]
fn test_total_balance_skips_inactive_accounts() {
    let accounts = vec![
        account(dec!(1200.50), RecordStatus::Active),
        account(dec!(-200), RecordStatus::Active),
        account(dec!(999), RecordStatus::Inactive),
    ];
    assert_eq!(ReportService::total_balance(&accounts), dec!(1000.50));
}

#[test]
fn test_financial_overview_bundles_cards() {
    let accounts = vec![account(dec!(300), RecordStatus::Active)];
    let overview = ReportService::financial_overview(&march_2024(), &accounts, d(2024, 3, 31));
    assert_eq!(overview.as_of, d(2024, 3, 31));
    assert_eq!(overview.total_balance, dec!(300));
    assert_eq!(overview.month.profit, dec!(60));
    assert_eq!(overview.outstanding.receivable, dec!(50));
    assert_eq!(overview.outstanding.overdue_count, 1);
}

fn arb_type() -> impl Strategy<Value = MovementType> {
    prop_oneof![
        Just(MovementType::Income),
        Just(MovementType::Expense),
        Just(MovementType::Transfer)
    ]
}

fn arb_status() -> impl Strategy<Value = MovementStatus> {
    prop::sample::select(MovementStatus::ALL.to_vec())
}

fn arb_movement() -> impl Strategy<Value = Movement> {
    (arb_type(), arb_status(), 1i64..10_000_000, 0u32..365, 0u32..365).prop_map(
        |(movement_type, status, cents, due_offset, paid_offset)| {
            let base = d(2024, 1, 1);
            let due = base + chrono::Days::new(u64::from(due_offset));
            let payment = (status == MovementStatus::Paid)
                .then(|| base + chrono::Days::new(u64::from(paid_offset)));
            movement(movement_type, status, Decimal::new(cents, 2), due, payment)
        },
    )
}

proptest! {
    /// Profit is exactly income minus expense for any input.
    #[test]
    fn prop_profit_is_income_minus_expense(rows in prop::collection::vec(arb_movement(), 0..60)) {
        let totals = ReportService::period_totals(&rows, Period::month_of(d(2024, 6, 1)));
        prop_assert_eq!(totals.profit, totals.income - totals.expense);
        for bucket in ReportService::monthly_series(&rows, d(2024, 12, 31), 12) {
            prop_assert_eq!(bucket.profit, bucket.income - bucket.expense);
        }
    }

    /// Monthly buckets partition the year: their totals match a single
    /// period spanning the same months.
    #[test]
    fn prop_monthly_buckets_partition_the_window(rows in prop::collection::vec(arb_movement(), 0..60)) {
        let series = ReportService::monthly_series(&rows, d(2024, 12, 15), 12);
        prop_assert_eq!(series.len(), 12);
        let whole = ReportService::period_totals(&rows, Period::new(d(2024, 1, 1), d(2025, 1, 1)).unwrap());
        prop_assert_eq!(series.iter().map(|b| b.income).sum::<Decimal>(), whole.income);
        prop_assert_eq!(series.iter().map(|b| b.expense).sum::<Decimal>(), whole.expense);
    }

    /// Category totals add up to the period's paid expense.
    #[test]
    fn prop_category_breakdown_sums_to_expense(rows in prop::collection::vec(arb_movement(), 0..60)) {
        let period = Period::new(d(2024, 1, 1), d(2025, 1, 1)).unwrap();
        let breakdown = ReportService::category_breakdown(&rows, &[], period);
        let expense = ReportService::period_totals(&rows, period).expense;
        prop_assert_eq!(breakdown.iter().map(|c| c.total).sum::<Decimal>(), expense);
        for pair in breakdown.windows(2) {
            prop_assert!(pair[0].total >= pair[1].total);
        }
    }

    /// Outstanding amounts never include settled rows and overdue is a subset.
    #[test]
    fn prop_overdue_is_subset_of_outstanding(rows in prop::collection::vec(arb_movement(), 0..60)) {
        let totals = ReportService::outstanding_totals(&rows, DateRange::unbounded(), d(2024, 7, 1));
        prop_assert!(totals.overdue_receivable <= totals.receivable);
        prop_assert!(totals.overdue_payable <= totals.payable);
        let open_value: Decimal = rows
            .iter()
            .filter(|m| m.status.is_open() && m.movement_type != MovementType::Transfer)
            .map(|m| m.value)
            .sum();
        prop_assert_eq!(totals.receivable + totals.payable, open_value);
    }
}
