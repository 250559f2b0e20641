//! Defines the endpoint for creating a new expense.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    app_state::ExpensesState,
    endpoints::{self, format_endpoint},
    expense::core::CreateExpenseRequest,
};

/// A route handler for creating a new expense, responds with the stored expense.
pub async fn create_expense_endpoint(
    State(state): State<ExpensesState>,
    payload: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(request) = payload?;
    let new_expense = request.validate()?;

    let expense = state
        .expense_store
        .create(new_expense)
        .inspect_err(|error| tracing::error!("could not create expense: {error}"))?;

    tracing::info!("created expense {} for user {}", expense.id, expense.user_id);

    let location = format_endpoint(endpoints::EXPENSE, expense.id.as_i64());

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(expense)).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Json,
        extract::State,
        http::{StatusCode, header::LOCATION},
        response::IntoResponse,
    };
    use time::macros::date;

    use crate::{
        Error, Expense, ExpenseStore, UserId, UserStore,
        app_state::ExpensesState,
        expense::core::CreateExpenseRequest,
        stores::sqlite::get_test_store,
    };

    use super::create_expense_endpoint;

    fn request(user_id: UserId) -> CreateExpenseRequest {
        CreateExpenseRequest {
            amount: Some(12.3),
            category: Some("Groceries".to_owned()),
            payment_mode: Some("UPI".to_owned()),
            date: Some("2024-01-05".to_owned()),
            notes: Some("milk".to_owned()),
            user_id: Some(user_id),
        }
    }

    #[tokio::test]
    async fn can_create_expense() {
        let store = get_test_store();
        let user = UserStore::create(&store, "Asha").unwrap();
        let state = ExpensesState {
            expense_store: Arc::new(store.clone()),
        };

        let response = create_expense_endpoint(State(state), Ok(Json(request(user.user_id))))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        let location = response.headers()[LOCATION].to_str().unwrap().to_owned();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let expense: Expense = serde_json::from_slice(&body).unwrap();
        assert_eq!(expense.amount, 12.3);
        assert_eq!(expense.date, date!(2024 - 01 - 05));
        assert_eq!(location, format!("/api/expenses/{}", expense.id));
        assert_eq!(ExpenseStore::get(&store, expense.id), Ok(expense));
    }

    #[tokio::test]
    async fn rejects_invalid_expense_without_storing_it() {
        let store = get_test_store();
        let user = UserStore::create(&store, "Asha").unwrap();
        let state = ExpensesState {
            expense_store: Arc::new(store.clone()),
        };
        let invalid = CreateExpenseRequest {
            amount: Some(-5.0),
            ..request(user.user_id)
        };

        let result = create_expense_endpoint(State(state), Ok(Json(invalid))).await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(ExpenseStore::list(&store, user.user_id), Ok(vec![]));
    }

    #[tokio::test]
    async fn rejects_unknown_user() {
        let state = ExpensesState {
            expense_store: Arc::new(get_test_store()),
        };

        let result = create_expense_endpoint(State(state), Ok(Json(request(UserId::new(8))))).await;

        assert!(matches!(result, Err(Error::UnknownUser(_))));
    }
}
