//! Application router configuration.

use axum::{Router, middleware, response::Redirect, routing::get};

use crate::{
    AppState,
    analytics::{get_analytics_endpoint, get_analytics_page, get_analytics_summary_endpoint},
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_categories_endpoint,
        get_expense_endpoint, get_expenses_page, list_expenses_endpoint, update_expense_endpoint,
    },
    logging::logging_middleware,
    not_found::get_404_not_found,
    user::{
        create_user_endpoint, create_user_form_endpoint, delete_user_endpoint, get_user_endpoint,
        get_users_page, list_users_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            endpoints::USERS,
            get(list_users_endpoint).post(create_user_endpoint),
        )
        .route(
            endpoints::USER,
            get(get_user_endpoint).delete(delete_user_endpoint),
        )
        .route(
            endpoints::EXPENSES_API,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint)
                .put(update_expense_endpoint)
                .delete(delete_expense_endpoint),
        )
        // Static segments take priority over `{expense_id}`.
        .route(endpoints::ANALYTICS_API, get(get_analytics_endpoint))
        .route(
            endpoints::ANALYTICS_SUMMARY_API,
            get(get_analytics_summary_endpoint),
        )
        .route(endpoints::CATEGORIES_API, get(get_categories_endpoint));

    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(
            endpoints::USERS_VIEW,
            get(get_users_page).post(create_user_form_endpoint),
        )
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::ANALYTICS_VIEW, get(get_analytics_page));

    api_routes
        .merge(view_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' redirects to the profile page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::USERS_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_profiles() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::USERS_VIEW);
    }
}
