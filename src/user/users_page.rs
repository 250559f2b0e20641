//! The profile page: pick a user or create one.

use axum::{
    Form,
    extract::{
        Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    response::{Html, IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    app_state::UsersState,
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_ROW_STYLE, base},
    session::Session,
    user::{User, UserId, core::validate_user_name},
};

/// The query string for the profile page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPageQuery {
    /// The user to mark as selected.
    pub user_id: Option<UserId>,
}

/// The form data for creating a user from the profile page.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserForm {
    /// The display name of the new user.
    pub name: Option<String>,
}

/// Display every user with links to their expenses and analytics.
pub async fn get_users_page(
    State(state): State<UsersState>,
    query: Result<Query<UsersPageQuery>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(query) = query?;

    let mut session = Session::default().with_users(state.user_store.list()?);
    if let Some(user_id) = query.user_id {
        session = session.select(user_id);
    }

    Ok(Html(users_view(&session).into_string()).into_response())
}

/// Create a user from the profile page form and show their expenses.
pub async fn create_user_form_endpoint(
    State(state): State<UsersState>,
    form: Result<Form<CreateUserForm>, FormRejection>,
) -> Result<Response, Error> {
    let Form(form) = form?;
    let name = validate_user_name(form.name.as_deref().unwrap_or_default())?;

    let user = state.user_store.create(&name)?;

    tracing::info!("created user {} ({})", user.user_id, user.name);

    Ok(Redirect::to(&user_link(endpoints::EXPENSES_VIEW, user.user_id)).into_response())
}

fn user_link(page: &str, user_id: UserId) -> String {
    format!("{page}?userId={user_id}")
}

fn users_view(session: &Session) -> Markup {
    let current_user_id = session.current_user_id();

    let user_row = |user: &User| {
        let is_current = current_user_id == Some(user.user_id);

        html!(
            li class=(TABLE_ROW_STYLE) data-user-id=(user.user_id)
            {
                div class="flex justify-between items-center px-6 py-4"
                {
                    span class="font-medium text-gray-900 dark:text-white"
                    {
                        (user.name)
                        @if is_current {
                            span data-current-user class="ml-2 text-sm text-gray-500" { "(current)" }
                        }
                    }

                    div class="flex gap-4"
                    {
                        a href=(user_link(endpoints::EXPENSES_VIEW, user.user_id)) class=(LINK_STYLE)
                        {
                            "Expenses"
                        }
                        a href=(user_link(endpoints::ANALYTICS_VIEW, user.user_id)) class=(LINK_STYLE)
                        {
                            "Analytics"
                        }
                    }
                }
            }
        )
    };

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-6" { "Profiles" }

            @if session.users.is_empty() {
                p id="no-users" class="text-gray-600 dark:text-gray-400 mb-6"
                {
                    "No profiles yet. Create one to start tracking expenses."
                }
            } @else {
                ul id="user-list" class="w-full mb-6"
                {
                    @for user in &session.users {
                        (user_row(user))
                    }
                }
            }

            form method="post" action=(endpoints::USERS_VIEW) class="flex gap-2 w-full"
            {
                input type="text" name="name" placeholder="Your name" required
                    aria-label="Name" class="flex-1";
                button type="submit" class=(LINK_STYLE) { "Create profile" }
            }
        }
    );

    base("Profiles", &[], &content)
}
