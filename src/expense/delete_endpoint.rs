//! Defines the endpoint for deleting an expense.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{Error, app_state::ExpensesState, expense::ExpenseId};

/// A route handler for deleting an expense.
///
/// Responds with 404 if the expense does not exist.
pub async fn delete_expense_endpoint(
    State(state): State<ExpensesState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Response, Error> {
    let Path(expense_id) = expense_id?;

    state.expense_store.delete(expense_id)?;

    tracing::info!("deleted expense {expense_id}");

    Ok(Json(json!({ "success": true })).into_response())
}
