//! A client-side snapshot of a user's expenses and the active filters.
//!
//! Changes are expressed as [ExpenseAction]s applied with [ExpenseState::apply],
//! which returns the next snapshot. Scheduling re-renders is left to the
//! presentation layer.

use std::collections::BTreeSet;

use crate::expense::{
    DateRange, Expense, ExpenseFilters, ExpenseId, filter::filter_expenses,
};

/// A partial change to [ExpenseFilters]. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    /// Replace the date range.
    pub date_range: Option<DateRange>,
    /// Replace the selected categories.
    pub categories: Option<BTreeSet<String>>,
    /// Replace the selected payment modes.
    pub payment_modes: Option<BTreeSet<String>>,
    /// Replace the search query.
    pub search_query: Option<String>,
}

/// Something that happened to the expense list.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseAction {
    /// The user's expenses were fetched from the store.
    Loaded(Vec<Expense>),
    /// An expense was created.
    Added(Expense),
    /// An expense was updated.
    Updated(Expense),
    /// An expense was deleted.
    Deleted(ExpenseId),
    /// Some filters were changed.
    SetFilters(FilterUpdate),
    /// All filters were reset.
    ClearFilters,
}

/// An immutable snapshot of the expense list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseState {
    /// The current user's expenses in the order they were received.
    pub expenses: Vec<Expense>,
    /// The active filters.
    pub filters: ExpenseFilters,
}

impl ExpenseState {
    /// Produce the snapshot that follows `action`.
    pub fn apply(self, action: ExpenseAction) -> Self {
        let ExpenseState {
            mut expenses,
            mut filters,
        } = self;

        match action {
            ExpenseAction::Loaded(loaded) => expenses = loaded,
            ExpenseAction::Added(expense) => expenses.push(expense),
            ExpenseAction::Updated(updated) => {
                if let Some(existing) = expenses.iter_mut().find(|e| e.id == updated.id) {
                    *existing = updated;
                }
            }
            ExpenseAction::Deleted(id) => expenses.retain(|expense| expense.id != id),
            ExpenseAction::SetFilters(update) => {
                if let Some(date_range) = update.date_range {
                    filters.date_range = date_range;
                }
                if let Some(categories) = update.categories {
                    filters.categories = categories;
                }
                if let Some(payment_modes) = update.payment_modes {
                    filters.payment_modes = payment_modes;
                }
                if let Some(search_query) = update.search_query {
                    filters.search_query = search_query;
                }
            }
            ExpenseAction::ClearFilters => filters = ExpenseFilters::default(),
        }

        Self { expenses, filters }
    }

    /// The expenses that pass the active filters.
    pub fn filtered(&self) -> Vec<Expense> {
        filter_expenses(&self.expenses, &self.filters)
    }
}
