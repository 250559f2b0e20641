//! Route handlers for user profiles.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    Error,
    app_state::UsersState,
    endpoints::{self, format_endpoint},
    user::{UserId, core::validate_user_name},
};

/// The JSON body for creating a user.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    /// The display name of the new user.
    pub name: Option<String>,
}

/// A route handler that returns every user, ordered by ID.
pub async fn list_users_endpoint(State(state): State<UsersState>) -> Result<Response, Error> {
    let users = state.user_store.list()?;

    Ok(Json(users).into_response())
}

/// A route handler for creating a new user.
///
/// The new user is given the next sequential ID.
pub async fn create_user_endpoint(
    State(state): State<UsersState>,
    request: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(request) = request?;
    let name = validate_user_name(request.name.as_deref().unwrap_or_default())?;

    let user = state.user_store.create(&name)?;

    tracing::info!("created user {} ({})", user.user_id, user.name);

    let location = format_endpoint(endpoints::USER, user.user_id.as_i64());

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(user)).into_response())
}

/// A route handler that returns a single user.
pub async fn get_user_endpoint(
    State(state): State<UsersState>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> Result<Response, Error> {
    let Path(user_id) = user_id?;

    let user = state.user_store.get(user_id)?;

    Ok(Json(user).into_response())
}

/// A route handler for deleting a user and, with them, their expenses.
pub async fn delete_user_endpoint(
    State(state): State<UsersState>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> Result<Response, Error> {
    let Path(user_id) = user_id?;

    state.user_store.delete(user_id)?;

    tracing::info!("deleted user {user_id}");

    Ok(Json(json!({ "success": true })).into_response())
}
