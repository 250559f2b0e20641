//! Defines the read-only expense endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    Error,
    app_state::ExpensesState,
    expense::{
        EXPENSE_CATEGORIES, Expense, ExpenseId, PAYMENT_MODES, filter::filter_expenses,
        query::ExpenseListQuery,
    },
    timestamp,
};

/// A route handler for listing a user's expenses.
///
/// The user's expenses are first narrowed by the filters in the query string,
/// then searched and sorted by the list view. Without any parameters besides
/// `userId` this gives every expense, newest first.
pub async fn list_expenses_endpoint(
    State(state): State<ExpensesState>,
    query: Result<Query<ExpenseListQuery>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(query) = query?;
    let expenses = load_expense_list(&state, &query)?;

    Ok(Json(expenses).into_response())
}

/// Apply the filters and list view in `query` to the requested user's expenses.
pub(crate) fn load_expense_list(
    state: &ExpensesState,
    query: &ExpenseListQuery,
) -> Result<Vec<Expense>, Error> {
    let user_id = query.user_id()?;
    let filters = query.filters(timestamp::today())?;
    let list_view = query.list_view();

    let expenses = state.expense_store.list(user_id)?;
    let filtered = filter_expenses(&expenses, &filters);

    Ok(list_view.apply(&filtered))
}

/// A route handler for getting a single expense.
pub async fn get_expense_endpoint(
    State(state): State<ExpensesState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Response, Error> {
    let Path(expense_id) = expense_id?;
    let expense = state.expense_store.get(expense_id)?;

    Ok(Json(expense).into_response())
}

/// A route handler that lists the categories and payment modes offered to users.
pub async fn get_categories_endpoint() -> Response {
    Json(json!({
        "categories": EXPENSE_CATEGORIES,
        "paymentModes": PAYMENT_MODES,
    }))
    .into_response()
}
