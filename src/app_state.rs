//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::stores::{ExpenseStore, UserStore};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The repository for expenses.
    pub expense_store: Arc<dyn ExpenseStore>,

    /// The repository for user profiles.
    pub user_store: Arc<dyn UserStore>,
}

impl AppState {
    /// Create a new [AppState] from a pair of stores.
    ///
    /// The stores are expected to share the same backing medium so that
    /// deleting a user also removes their expenses.
    pub fn new(expense_store: Arc<dyn ExpenseStore>, user_store: Arc<dyn UserStore>) -> Self {
        Self {
            expense_store,
            user_store,
        }
    }
}

/// The state needed by handlers that read or write expenses.
#[derive(Clone)]
pub struct ExpensesState {
    /// The repository for expenses.
    pub expense_store: Arc<dyn ExpenseStore>,
}

impl FromRef<AppState> for ExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
        }
    }
}

/// The state needed by handlers that manage user profiles.
#[derive(Clone)]
pub struct UsersState {
    /// The repository for user profiles.
    pub user_store: Arc<dyn UserStore>,
}

impl FromRef<AppState> for UsersState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            user_store: state.user_store.clone(),
        }
    }
}
