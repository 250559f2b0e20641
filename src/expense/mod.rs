//! Expense management.
//!
//! This module contains:
//! - The expense model and request validation
//! - The filter engine and the list view (search and sort)
//! - The client-side expense state and its actions
//! - The JSON endpoints and the HTML expenses page

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod expenses_page;
pub(crate) mod filter;
mod list_endpoint;
mod list_view;
pub(crate) mod query;
mod state;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{EXPENSE_CATEGORIES, Expense, ExpenseId, ExpensePatch, NewExpense, PAYMENT_MODES};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_endpoint::update_expense_endpoint;
pub use expenses_page::get_expenses_page;
pub use filter::{DateRange, ExpenseFilters, QuickRange, filter_expenses};
pub use list_endpoint::{get_categories_endpoint, get_expense_endpoint, list_expenses_endpoint};
pub use list_view::{ListSummary, ListView, SortField, SortOrder};
pub use state::{ExpenseAction, ExpenseState, FilterUpdate};
