//! HTTP handlers for monthly analytics.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    Error,
    analytics::{AnalyticsSummary, MonthBucket, aggregate},
    app_state::ExpensesState,
    expense::Expense,
    user::UserId,
};

/// The query string accepted by the analytics endpoints and page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub user_id: Option<UserId>,
}

/// Load the requested user's expenses and their monthly buckets.
pub(super) fn load_analytics(
    state: &ExpensesState,
    query: &AnalyticsQuery,
) -> Result<(Vec<Expense>, Vec<MonthBucket>), Error> {
    let user_id = query
        .user_id
        .ok_or_else(|| Error::validation("userId is required"))?;

    let expenses = state.expense_store.list(user_id)?;
    let buckets = aggregate(&expenses);

    Ok((expenses, buckets))
}

/// A route handler that returns a user's spending per month and category.
pub async fn get_analytics_endpoint(
    State(state): State<ExpensesState>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(query) = query?;
    let (_, buckets) = load_analytics(&state, &query)?;

    Ok(Json(buckets).into_response())
}

/// A route handler that returns headline figures for a user's spending.
pub async fn get_analytics_summary_endpoint(
    State(state): State<ExpensesState>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(query) = query?;
    let (expenses, buckets) = load_analytics(&state, &query)?;

    Ok(Json(AnalyticsSummary::from_expenses(&expenses, &buckets)).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::{Query, State};
    use time::macros::date;

    use crate::{
        Error, ExpenseStore, NewExpense, UserId, UserStore, app_state::ExpensesState,
        stores::sqlite::get_test_store,
    };

    use super::{AnalyticsQuery, get_analytics_endpoint, load_analytics};

    #[test]
    fn aggregates_only_the_users_expenses() {
        let store = get_test_store();
        let user = UserStore::create(&store, "Asha").unwrap().user_id;
        let other = UserStore::create(&store, "Ben").unwrap().user_id;
        for (user_id, amount) in [(user, 50.0), (user, 30.0), (other, 99.0)] {
            ExpenseStore::create(
                &store,
                NewExpense {
                    user_id,
                    amount,
                    category: "Travel".to_owned(),
                    payment_mode: "Cash".to_owned(),
                    date: date!(2024 - 01 - 05),
                    notes: String::new(),
                },
            )
            .unwrap();
        }
        let state = ExpensesState {
            expense_store: Arc::new(store),
        };

        let (expenses, buckets) = load_analytics(
            &state,
            &AnalyticsQuery {
                user_id: Some(user),
            },
        )
        .unwrap();

        assert_eq!(expenses.len(), 2);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].totals["Travel"], 80.0);
    }

    #[tokio::test]
    async fn user_id_is_required() {
        let state = ExpensesState {
            expense_store: Arc::new(get_test_store()),
        };

        let result = get_analytics_endpoint(State(state), Ok(Query(AnalyticsQuery::default()))).await;

        assert_eq!(
            result.err(),
            Some(Error::Validation("userId is required".to_owned()))
        );
    }

    #[test]
    fn unknown_user_has_no_buckets() {
        let state = ExpensesState {
            expense_store: Arc::new(get_test_store()),
        };

        let (expenses, buckets) = load_analytics(
            &state,
            &AnalyticsQuery {
                user_id: Some(UserId::new(3)),
            },
        )
        .unwrap();

        assert!(expenses.is_empty());
        assert!(buckets.is_empty());
    }
}
