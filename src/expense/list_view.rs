//! The list view: a second, independent search over already filtered
//! expenses followed by sorting for display.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::expense::{Expense, filter::matches_search};

/// The field to sort the expense list by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Sort by calendar date.
    #[default]
    Date,
    /// Sort numerically by amount.
    Amount,
    /// Sort by category, ignoring case.
    Category,
}

/// The direction to sort the expense list in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Asc,
    /// Sort in order of decreasing value.
    #[default]
    Desc,
}

impl SortOrder {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// The search and sort settings of the expense list.
///
/// The default view shows everything, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    /// Keep expenses whose notes, category or payment mode contain this text,
    /// ignoring case. Empty keeps all.
    pub search_term: String,
    /// The field to sort by.
    pub sort_field: SortField,
    /// The direction to sort in.
    pub sort_order: SortOrder,
}

impl ListView {
    /// Search and sort `expenses` into a new list.
    ///
    /// The sort is stable, so expenses with equal keys keep their input order
    /// in both directions.
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        let needle = self.search_term.to_lowercase();

        let mut shown: Vec<Expense> = expenses
            .iter()
            .filter(|expense| needle.is_empty() || matches_search(expense, &needle))
            .cloned()
            .collect();

        shown.sort_by(|a, b| self.compare(a, b));

        shown
    }

    /// Select `field` for sorting.
    ///
    /// Selecting the current field flips the direction, a different field is
    /// sorted in descending order.
    pub fn toggle_sort(self, field: SortField) -> Self {
        let sort_order = if self.sort_field == field {
            self.sort_order.flipped()
        } else {
            SortOrder::Desc
        };

        Self {
            sort_field: field,
            sort_order,
            ..self
        }
    }

    fn compare(&self, a: &Expense, b: &Expense) -> Ordering {
        let ordering = match self.sort_field {
            SortField::Date => a.date.cmp(&b.date),
            SortField::Amount => a.amount.total_cmp(&b.amount),
            SortField::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
        };

        match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// A short description of what the list is showing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary {
    /// How many expenses are shown.
    pub shown: usize,
    /// How many expenses there were before the list view's search.
    pub before_search: usize,
    /// The sum of the shown amounts.
    pub total_amount: f64,
}

impl ListSummary {
    /// Summarise the result of [ListView::apply] on `input`.
    pub fn new(input: &[Expense], shown: &[Expense]) -> Self {
        Self {
            shown: shown.len(),
            before_search: input.len(),
            total_amount: shown.iter().map(|expense| expense.amount).sum(),
        }
    }

    /// Whether the search hid some of the input.
    pub fn is_narrowed(&self) -> bool {
        self.shown != self.before_search
    }
}
