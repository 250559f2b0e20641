//! Contains the repository traits for expenses and users and their implementations.
//!
//! The persistence medium is swappable: [SQLiteStore] keeps records in a
//! SQLite database and [JsonFileStore] keeps a local JSON snapshot. Both
//! implement the same traits, so the handlers and the pure expense logic are
//! identical either way.

mod json_file;
pub(crate) mod sqlite;

pub use json_file::JsonFileStore;
pub use sqlite::SQLiteStore;

use crate::{
    Error,
    expense::{Expense, ExpenseId, ExpensePatch, NewExpense},
    user::{User, UserId},
};

/// Handles the creation, retrieval, update and deletion of expenses.
///
/// Every read is scoped to a single user by the caller.
pub trait ExpenseStore: Send + Sync {
    /// Retrieve all expenses owned by `user_id`, newest date first.
    fn list(&self, user_id: UserId) -> Result<Vec<Expense>, Error>;

    /// Retrieve a single expense.
    ///
    /// Returns [Error::NotFound] if `id` does not refer to an expense.
    fn get(&self, id: ExpenseId) -> Result<Expense, Error>;

    /// Create a new expense, assigning its ID and creation time.
    ///
    /// Returns [Error::UnknownUser] if the owner does not exist.
    fn create(&self, expense: NewExpense) -> Result<Expense, Error>;

    /// Apply a partial update to an expense and return the updated expense.
    ///
    /// Returns [Error::NotFound] if `id` does not refer to an expense.
    fn update(&self, id: ExpenseId, patch: ExpensePatch) -> Result<Expense, Error>;

    /// Delete an expense.
    ///
    /// Returns [Error::NotFound] if `id` does not refer to an expense.
    fn delete(&self, id: ExpenseId) -> Result<(), Error>;
}

/// Handles the creation and retrieval of user profiles.
pub trait UserStore: Send + Sync {
    /// Retrieve all users in order of their ID.
    fn list(&self) -> Result<Vec<User>, Error>;

    /// Retrieve a user by ID.
    ///
    /// Returns [Error::NotFound] if no such user exists.
    fn get(&self, user_id: UserId) -> Result<User, Error>;

    /// Create a user with the next sequential ID.
    ///
    /// `name` must already be validated.
    fn create(&self, name: &str) -> Result<User, Error>;

    /// Delete a user and every expense they own.
    ///
    /// Returns [Error::NotFound] if no such user exists.
    fn delete(&self, user_id: UserId) -> Result<(), Error>;
}
