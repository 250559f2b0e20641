//! The set of known users and the one currently selected.
//!
//! A [Session] is a plain value. Clients keep their own copy and pass the
//! selected user's ID to every expense request.

use crate::user::{User, UserId};

/// Known users and the currently selected user, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Every user the client knows about.
    pub users: Vec<User>,
    /// The user whose expenses are visible.
    pub current_user: Option<User>,
}

impl Session {
    /// Replace the known users.
    ///
    /// The current user is kept only if they are still in `users`.
    pub fn with_users(self, users: Vec<User>) -> Self {
        let current_user = self.current_user.and_then(|current| {
            users
                .iter()
                .find(|user| user.user_id == current.user_id)
                .cloned()
        });

        Self {
            users,
            current_user,
        }
    }

    /// Add a newly created user and select them.
    pub fn with_created_user(mut self, user: User) -> Self {
        self.users.push(user.clone());
        self.current_user = Some(user);
        self
    }

    /// Select the user with `user_id`.
    ///
    /// Unknown IDs leave the session unchanged.
    pub fn select(self, user_id: UserId) -> Self {
        match self.users.iter().find(|user| user.user_id == user_id) {
            Some(user) => Self {
                current_user: Some(user.clone()),
                ..self
            },
            None => {
                tracing::debug!("ignoring selection of unknown user {user_id}");
                self
            }
        }
    }

    /// The ID of the selected user, used to scope expense requests.
    pub fn current_user_id(&self) -> Option<UserId> {
        self.current_user.as_ref().map(|user| user.user_id)
    }
}
