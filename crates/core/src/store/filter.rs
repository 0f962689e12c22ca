//! Query filters for the record store.
//!
//! Filters are plain data so both the SQL store and the in-memory store
//! can honour them. `matches` is the reference semantics; SQL backends
//! translate the same fields into `WHERE` clauses.

use std::cmp::Reverse;

use bizdesk_shared::types::AccountId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::Period;
use crate::movement::{Movement, MovementStatus, MovementType};
use crate::records::{Account, AccountKind, Category, CategoryType, Party, PartyKind, RecordStatus};

/// Optional half-open date bounds `[from, to)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    pub from: Option<NaiveDate>,
    /// First day excluded.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// A range with no bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { from: None, to: None }
    }

    /// Returns true if neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Returns true if `date` satisfies every bound.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date < to)
    }

    /// Like [`contains`](Self::contains), but a missing date only passes an
    /// unbounded range.
    #[must_use]
    pub fn contains_opt(&self, date: Option<NaiveDate>) -> bool {
        match date {
            Some(d) => self.contains(d),
            None => self.is_unbounded(),
        }
    }
}

impl From<Period> for DateRange {
    fn from(period: Period) -> Self {
        Self {
            from: Some(period.start),
            to: Some(period.end),
        }
    }
}

/// Ordering of movement lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementOrder {
    /// Latest due date first.
    #[default]
    DueDateDesc,
    /// Earliest due date first.
    DueDateAsc,
    /// Latest payment first; unpaid rows last.
    PaymentDateDesc,
}

impl MovementOrder {
    /// Sorts movements in place. Ties fall back to ID order.
    pub fn sort(self, movements: &mut [Movement]) {
        match self {
            Self::DueDateDesc => movements.sort_by_key(|m| (Reverse(m.due_date), m.id)),
            Self::DueDateAsc => movements.sort_by_key(|m| (m.due_date, m.id)),
            Self::PaymentDateDesc => movements.sort_by_key(|m| (Reverse(m.payment_date), m.id)),
        }
    }
}

/// Movement query filter. Empty fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementFilter {
    /// Restrict to one movement type.
    pub movement_type: Option<MovementType>,
    /// Restrict to any of these stored statuses.
    pub statuses: Vec<MovementStatus>,
    /// Restrict to one owning account.
    pub account_id: Option<AccountId>,
    /// Case-insensitive description substring.
    pub search: Option<String>,
    /// Bounds on the due date.
    pub due: DateRange,
    /// Bounds on the payment date.
    pub paid: DateRange,
    /// Result ordering.
    pub order: MovementOrder,
}

impl MovementFilter {
    /// Paid movements of `movement_type` settled within `period`.
    #[must_use]
    pub fn paid_in(movement_type: MovementType, period: Period) -> Self {
        Self {
            movement_type: Some(movement_type),
            statuses: vec![MovementStatus::Paid],
            paid: period.into(),
            order: MovementOrder::PaymentDateDesc,
            ..Self::default()
        }
    }

    /// Movements still awaiting settlement, including legacy overdue rows.
    #[must_use]
    pub fn open() -> Self {
        Self {
            statuses: vec![MovementStatus::Pending, MovementStatus::Overdue],
            order: MovementOrder::DueDateAsc,
            ..Self::default()
        }
    }

    /// Returns true if `movement` satisfies every set field.
    #[must_use]
    pub fn matches(&self, movement: &Movement) -> bool {
        self.movement_type.is_none_or(|t| movement.movement_type == t)
            && (self.statuses.is_empty() || self.statuses.contains(&movement.status))
            && self.account_id.is_none_or(|a| movement.account_id == a)
            && search_matches(self.search.as_deref(), &movement.description)
            && self.due.contains(movement.due_date)
            && self.paid.contains_opt(movement.payment_date)
    }
}

/// Account query filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountFilter {
    /// Restrict to one status.
    pub status: Option<RecordStatus>,
    /// Restrict to one kind.
    pub kind: Option<AccountKind>,
}

impl AccountFilter {
    /// Active accounts of any kind.
    #[must_use]
    pub fn active() -> Self {
        Self {
            status: Some(RecordStatus::Active),
            kind: None,
        }
    }

    /// Returns true if `account` satisfies every set field.
    #[must_use]
    pub fn matches(&self, account: &Account) -> bool {
        self.status.is_none_or(|s| account.status == s) && self.kind.is_none_or(|k| account.kind == k)
    }
}

/// Category query filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Restrict to one status.
    pub status: Option<RecordStatus>,
    /// Restrict to income or expense categories.
    pub category_type: Option<CategoryType>,
}

impl CategoryFilter {
    /// Returns true if `category` satisfies every set field.
    #[must_use]
    pub fn matches(&self, category: &Category) -> bool {
        self.status.is_none_or(|s| category.status == s)
            && self.category_type.is_none_or(|t| category.category_type == t)
    }
}

/// Party query filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyFilter {
    /// Restrict to one status.
    pub status: Option<RecordStatus>,
    /// Restrict to customers or suppliers.
    pub kind: Option<PartyKind>,
    /// Case-insensitive substring of name, email, or phone.
    pub search: Option<String>,
}

impl PartyFilter {
    /// Returns true if `party` satisfies every set field.
    #[must_use]
    pub fn matches(&self, party: &Party) -> bool {
        self.status.is_none_or(|s| party.status == s)
            && self.kind.is_none_or(|k| party.kind == k)
            && (search_matches(self.search.as_deref(), &party.name)
                || party
                    .email
                    .iter()
                    .chain(&party.phone)
                    .any(|field| search_matches(self.search.as_deref(), field)))
    }
}

fn search_matches(needle: Option<&str>, haystack: &str) -> bool {
    match needle.map(str::trim) {
        None | Some("") => true,
        Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
    }
}
