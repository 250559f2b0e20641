//! The filter engine: narrows an expense collection by date range, category,
//! payment mode and free-text search.
//!
//! All criteria are combined with AND. An unset criterion (no date bound, an
//! empty set, an empty search query) places no restriction on the result.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::expense::Expense;

/// An inclusive date range where `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The earliest date to include.
    pub from: Option<Date>,
    /// The latest date to include.
    pub to: Option<Date>,
}

impl DateRange {
    /// Whether `date` lies within the range.
    pub fn contains(&self, date: Date) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// A named date range relative to a reference date.
///
/// The reference date must be supplied by the caller: resolving the same
/// quick range on different days gives different bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickRange {
    /// The seven days ending today.
    #[serde(rename = "last-7-days")]
    Last7Days,
    /// The thirty days ending today.
    #[serde(rename = "last-30-days")]
    Last30Days,
    /// The first of the current month up to today.
    ThisMonth,
    /// The whole of the previous calendar month.
    LastMonth,
    /// The first of January up to today.
    ThisYear,
}

impl QuickRange {
    /// Every quick range, in the order they are offered to users.
    pub const ALL: [QuickRange; 5] = [
        QuickRange::Last7Days,
        QuickRange::Last30Days,
        QuickRange::ThisMonth,
        QuickRange::LastMonth,
        QuickRange::ThisYear,
    ];

    /// The value used in query strings, e.g. `last-7-days`.
    pub fn as_str(self) -> &'static str {
        match self {
            QuickRange::Last7Days => "last-7-days",
            QuickRange::Last30Days => "last-30-days",
            QuickRange::ThisMonth => "this-month",
            QuickRange::LastMonth => "last-month",
            QuickRange::ThisYear => "this-year",
        }
    }

    /// A label for display.
    pub fn label(self) -> &'static str {
        match self {
            QuickRange::Last7Days => "Last 7 days",
            QuickRange::Last30Days => "Last 30 days",
            QuickRange::ThisMonth => "This month",
            QuickRange::LastMonth => "Last month",
            QuickRange::ThisYear => "This year",
        }
    }

    /// Compute the concrete bounds of the range as seen from `today`.
    pub fn resolve(self, today: Date) -> DateRange {
        let start_of_month = today - Duration::days(i64::from(today.day()) - 1);

        let (from, to) = match self {
            QuickRange::Last7Days => (today - Duration::days(6), today),
            QuickRange::Last30Days => (today - Duration::days(29), today),
            QuickRange::ThisMonth => (start_of_month, today),
            QuickRange::LastMonth => {
                let end_of_last_month = start_of_month - Duration::days(1);
                let start_of_last_month =
                    end_of_last_month - Duration::days(i64::from(end_of_last_month.day()) - 1);
                (start_of_last_month, end_of_last_month)
            }
            QuickRange::ThisYear => (today - Duration::days(i64::from(today.ordinal()) - 1), today),
        };

        DateRange {
            from: Some(from),
            to: Some(to),
        }
    }
}

/// The criteria used to narrow a user's expenses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilters {
    /// Only keep expenses in this range.
    pub date_range: DateRange,
    /// Only keep expenses in one of these categories. Empty keeps all.
    pub categories: BTreeSet<String>,
    /// Only keep expenses paid with one of these modes. Empty keeps all.
    pub payment_modes: BTreeSet<String>,
    /// Only keep expenses whose notes, category or payment mode contain this
    /// text, ignoring case. Empty keeps all.
    pub search_query: String,
}

impl ExpenseFilters {
    /// Whether `expense` satisfies every criterion.
    pub fn matches(&self, expense: &Expense) -> bool {
        if !self.date_range.contains(expense.date) {
            return false;
        }

        if !self.categories.is_empty() && !self.categories.contains(&expense.category) {
            return false;
        }

        if !self.payment_modes.is_empty() && !self.payment_modes.contains(&expense.payment_mode)
        {
            return false;
        }

        if !self.search_query.is_empty()
            && !matches_search(expense, &self.search_query.to_lowercase())
        {
            return false;
        }

        true
    }

    /// The number of criteria currently restricting the result.
    ///
    /// Each selected category and payment mode counts once, as does each date
    /// bound and a non-empty search query.
    pub fn active_count(&self) -> usize {
        self.categories.len()
            + self.payment_modes.len()
            + usize::from(self.date_range.from.is_some())
            + usize::from(self.date_range.to.is_some())
            + usize::from(!self.search_query.is_empty())
    }
}

/// Apply `filters` to `expenses`, preserving the relative order of the
/// expenses that are kept.
pub fn filter_expenses(expenses: &[Expense], filters: &ExpenseFilters) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| filters.matches(expense))
        .cloned()
        .collect()
}

/// Whether the lowercase `needle` occurs in the notes, category or payment
/// mode of `expense`, ignoring case.
pub(crate) fn matches_search(expense: &Expense, needle: &str) -> bool {
    [&expense.notes, &expense.category, &expense.payment_mode]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
