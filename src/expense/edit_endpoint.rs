//! Defines the endpoint for updating an expense.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    app_state::ExpensesState,
    expense::{ExpenseId, core::UpdateExpenseRequest},
};

/// A route handler for partially updating an expense, responds with the updated expense.
pub async fn update_expense_endpoint(
    State(state): State<ExpensesState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    payload: Result<Json<UpdateExpenseRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let Path(expense_id) = expense_id?;
    let Json(request) = payload?;
    let patch = request.validate()?;

    let expense = state
        .expense_store
        .update(expense_id, patch)
        .inspect_err(|error| tracing::error!("could not update expense {expense_id}: {error}"))?;

    Ok(Json(expense).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Json,
        extract::{Path, State},
    };
    use time::macros::date;

    use crate::{
        Error, ExpenseId, ExpenseStore, NewExpense, UserStore,
        app_state::ExpensesState,
        expense::core::UpdateExpenseRequest,
        stores::sqlite::get_test_store,
    };

    use super::update_expense_endpoint;

    #[tokio::test]
    async fn updates_only_given_fields() {
        let store = get_test_store();
        let user = UserStore::create(&store, "Asha").unwrap();
        let expense = ExpenseStore::create(
            &store,
            NewExpense {
                user_id: user.user_id,
                amount: 20.0,
                category: "Travel".to_owned(),
                payment_mode: "Cash".to_owned(),
                date: date!(2024 - 01 - 05),
                notes: "bus".to_owned(),
            },
        )
        .unwrap();
        let state = ExpensesState {
            expense_store: Arc::new(store.clone()),
        };
        let request = UpdateExpenseRequest {
            amount: Some(25.0),
            ..Default::default()
        };

        update_expense_endpoint(State(state), Ok(Path(expense.id)), Ok(Json(request)))
            .await
            .unwrap();

        let updated = ExpenseStore::get(&store, expense.id).unwrap();
        assert_eq!(updated.amount, 25.0);
        assert_eq!(updated.notes, "bus");
        assert_eq!(updated.category, "Travel");
    }

    #[tokio::test]
    async fn missing_expense_is_not_found() {
        let state = ExpensesState {
            expense_store: Arc::new(get_test_store()),
        };

        let result = update_expense_endpoint(
            State(state),
            Ok(Path(ExpenseId::new(3))),
            Ok(Json(UpdateExpenseRequest::default())),
        )
        .await;

        assert!(matches!(result, Err(Error::NotFound)));
    }
}
