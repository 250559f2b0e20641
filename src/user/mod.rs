//! User profiles.
//!
//! Every expense belongs to exactly one user and every read of expenses is
//! scoped by a user ID.

mod core;
mod endpoints;
mod users_page;

pub use core::{User, UserId};
pub use endpoints::{
    create_user_endpoint, delete_user_endpoint, get_user_endpoint, list_users_endpoint,
};
pub use users_page::{create_user_form_endpoint, get_users_page};
