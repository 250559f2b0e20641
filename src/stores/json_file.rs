//! Implements the expense and user stores on top of a local JSON file.
//!
//! The whole snapshot is kept in memory and rewritten after every change. A
//! change is only applied in memory once it has been written to disk.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{Expense, ExpenseId, ExpensePatch, NewExpense},
    stores::{ExpenseStore, UserStore},
    timestamp,
    user::{User, UserId},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Snapshot {
    users: Vec<User>,
    expenses: Vec<Expense>,
    /// Expense IDs are never reused, even after a delete.
    next_expense_id: i64,
}

/// Stores expenses and users in a JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    snapshot: Mutex<Snapshot>,
}

impl JsonFileStore {
    /// Load the store from `path`.
    ///
    /// A missing file is treated as an empty store and is created on the
    /// first write.
    ///
    /// # Errors
    /// Returns [Error::Storage] if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        let mut snapshot: Snapshot = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|error| {
                Error::Storage(format!("could not parse {}: {error}", path.display()))
            })?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::info!("{} does not exist, starting empty", path.display());
                Snapshot::default()
            }
            Err(error) => {
                return Err(Error::Storage(format!(
                    "could not read {}: {error}",
                    path.display()
                )));
            }
        };

        // The counter may be missing or stale if the file was edited by hand.
        let after_largest_id = snapshot
            .expenses
            .iter()
            .map(|expense| expense.id.as_i64() + 1)
            .max()
            .unwrap_or(1);
        snapshot.next_expense_id = snapshot.next_expense_id.max(after_largest_id);

        Ok(Self {
            path,
            snapshot: Mutex::new(snapshot),
        })
    }

    fn snapshot(&self) -> Result<MutexGuard<'_, Snapshot>, Error> {
        self.snapshot
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire snapshot lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }

    /// Apply `change` to a copy of the snapshot, save it, and then swap it in.
    ///
    /// Writes are serialized through the snapshot lock, which is held while
    /// the file is written.
    fn modify<T>(&self, change: impl FnOnce(&mut Snapshot) -> Result<T, Error>) -> Result<T, Error> {
        let mut snapshot = self.snapshot()?;
        let mut next = snapshot.clone();

        let result = change(&mut next)?;
        self.save(&next)?;
        *snapshot = next;

        Ok(result)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), Error> {
        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|error| Error::Storage(format!("could not serialize snapshot: {error}")))?;

        // Write then rename so that a crash never leaves a half written file.
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .and_then(|_| fs::rename(&temp_path, &self.path))
            .map_err(|error| {
                Error::Storage(format!("could not write {}: {error}", self.path.display()))
            })?;

        tracing::debug!("saved snapshot to {}", self.path.display());

        Ok(())
    }
}

impl ExpenseStore for JsonFileStore {
    fn list(&self, user_id: UserId) -> Result<Vec<Expense>, Error> {
        let mut expenses: Vec<Expense> = self
            .snapshot()?
            .expenses
            .iter()
            .filter(|expense| expense.user_id == user_id)
            .cloned()
            .collect();

        expenses.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(expenses)
    }

    fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        self.snapshot()?
            .expenses
            .iter()
            .find(|expense| expense.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn create(&self, expense: NewExpense) -> Result<Expense, Error> {
        self.modify(|snapshot| {
            if !snapshot.users.iter().any(|user| user.user_id == expense.user_id) {
                return Err(Error::UnknownUser(expense.user_id));
            }

            let id = ExpenseId::new(snapshot.next_expense_id.max(1));
            snapshot.next_expense_id = id.as_i64() + 1;

            let expense = expense.into_expense(id, timestamp::now());
            snapshot.expenses.push(expense.clone());

            Ok(expense)
        })
    }

    fn update(&self, id: ExpenseId, patch: ExpensePatch) -> Result<Expense, Error> {
        self.modify(|snapshot| {
            let existing = snapshot
                .expenses
                .iter_mut()
                .find(|expense| expense.id == id)
                .ok_or(Error::NotFound)?;

            *existing = patch.apply_to(existing);

            Ok(existing.clone())
        })
    }

    fn delete(&self, id: ExpenseId) -> Result<(), Error> {
        self.modify(|snapshot| {
            let count_before = snapshot.expenses.len();
            snapshot.expenses.retain(|expense| expense.id != id);

            if snapshot.expenses.len() == count_before {
                return Err(Error::NotFound);
            }

            Ok(())
        })
    }
}

impl UserStore for JsonFileStore {
    fn list(&self) -> Result<Vec<User>, Error> {
        let mut users = self.snapshot()?.users.clone();
        users.sort_by_key(|user| user.user_id);

        Ok(users)
    }

    fn get(&self, user_id: UserId) -> Result<User, Error> {
        self.snapshot()?
            .users
            .iter()
            .find(|user| user.user_id == user_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn create(&self, name: &str) -> Result<User, Error> {
        self.modify(|snapshot| {
            let user_id = snapshot
                .users
                .iter()
                .map(|user| user.user_id)
                .max()
                .map_or(UserId::FIRST, UserId::next);

            let user = User {
                user_id,
                name: name.to_owned(),
                created_at: timestamp::now(),
            };
            snapshot.users.push(user.clone());

            Ok(user)
        })
    }

    fn delete(&self, user_id: UserId) -> Result<(), Error> {
        self.modify(|snapshot| {
            let count_before = snapshot.users.len();
            snapshot.users.retain(|user| user.user_id != user_id);

            if snapshot.users.len() == count_before {
                return Err(Error::NotFound);
            }

            snapshot.expenses.retain(|expense| expense.user_id != user_id);

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use time::{Date, macros::date};

    use crate::{
        Error, ExpenseId, ExpensePatch, NewExpense, UserId,
        stores::{ExpenseStore, UserStore},
    };

    use super::JsonFileStore;

    fn open_temp_store() -> (TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("expenses.json")).unwrap();

        (dir, store)
    }

    fn new_expense(user_id: UserId, date: Date) -> NewExpense {
        NewExpense {
            user_id,
            amount: 42.0,
            category: "Groceries".to_owned(),
            payment_mode: "UPI".to_owned(),
            date,
            notes: "weekly shop".to_owned(),
        }
    }

    #[test]
    fn missing_file_is_empty_store() {
        let (_dir, store) = open_temp_store();

        assert_eq!(UserStore::list(&store), Ok(vec![]));
        assert_eq!(ExpenseStore::list(&store, UserId::FIRST), Ok(vec![]));
    }

    #[test]
    fn changes_survive_reopening() {
        let (dir, store) = open_temp_store();
        let user = UserStore::create(&store, "Asha").unwrap();
        let expense =
            ExpenseStore::create(&store, new_expense(user.user_id, date!(2024 - 01 - 05))).unwrap();
        drop(store);

        let reopened = JsonFileStore::open(dir.path().join("expenses.json")).unwrap();

        assert_eq!(UserStore::get(&reopened, user.user_id), Ok(user));
        assert_eq!(ExpenseStore::get(&reopened, expense.id), Ok(expense));
    }

    #[test]
    fn ids_continue_after_largest_stored_id() {
        let (dir, store) = open_temp_store();
        let user = UserStore::create(&store, "Asha").unwrap();
        for _ in 0..3 {
            ExpenseStore::create(&store, new_expense(user.user_id, date!(2024 - 01 - 05))).unwrap();
        }
        drop(store);

        let path = dir.path().join("expenses.json");
        let mut content: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        content.as_object_mut().unwrap().remove("nextExpenseId");
        fs::write(&path, content.to_string()).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let expense =
            ExpenseStore::create(&reopened, new_expense(user.user_id, date!(2024 - 01 - 06)))
                .unwrap();

        assert_eq!(expense.id, ExpenseId::new(4));
    }

    #[test]
    fn corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.json");
        fs::write(&path, "{ not json").unwrap();

        let result = JsonFileStore::open(&path);

        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn user_ids_follow_the_largest_existing_id() {
        let (_dir, store) = open_temp_store();

        let first = UserStore::create(&store, "Asha").unwrap();
        let second = UserStore::create(&store, "Ben").unwrap();

        assert_eq!(first.user_id, UserId::FIRST);
        assert_eq!(second.user_id, UserId::new(2));
    }

    #[test]
    fn expense_for_unknown_user_is_rejected_and_not_saved() {
        let (_dir, store) = open_temp_store();
        let ghost = UserId::new(5);

        let result = ExpenseStore::create(&store, new_expense(ghost, date!(2024 - 01 - 05)));

        assert_eq!(result, Err(Error::UnknownUser(ghost)));
        assert_eq!(ExpenseStore::list(&store, ghost), Ok(vec![]));
    }

    #[test]
    fn concurrent_writes_are_all_saved() {
        let (dir, store) = open_temp_store();
        let user = UserStore::create(&store, "Asha").unwrap();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..5 {
                        ExpenseStore::create(&store, new_expense(user.user_id, date!(2024 - 01 - 05)))
                            .unwrap();
                    }
                });
            }
        });
        drop(store);

        let reopened = JsonFileStore::open(dir.path().join("expenses.json")).unwrap();
        let mut ids: Vec<i64> = ExpenseStore::list(&reopened, user.user_id)
            .unwrap()
            .iter()
            .map(|expense| expense.id.as_i64())
            .collect();
        ids.sort_unstable();

        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn expense_ids_are_not_reused() {
        let (_dir, store) = open_temp_store();
        let user = UserStore::create(&store, "Asha").unwrap();
        let first =
            ExpenseStore::create(&store, new_expense(user.user_id, date!(2024 - 01 - 05))).unwrap();
        ExpenseStore::delete(&store, first.id).unwrap();

        let second =
            ExpenseStore::create(&store, new_expense(user.user_id, date!(2024 - 01 - 06))).unwrap();

        assert_eq!(first.id, ExpenseId::new(1));
        assert_eq!(second.id, ExpenseId::new(2));
    }

    #[test]
    fn list_is_newest_first() {
        let (_dir, store) = open_temp_store();
        let user = UserStore::create(&store, "Asha").unwrap();
        let older =
            ExpenseStore::create(&store, new_expense(user.user_id, date!(2024 - 01 - 05))).unwrap();
        let newer =
            ExpenseStore::create(&store, new_expense(user.user_id, date!(2024 - 03 - 05))).unwrap();

        assert_eq!(ExpenseStore::list(&store, user.user_id), Ok(vec![newer, older]));
    }

    #[test]
    fn update_keeps_identity_fields() {
        let (_dir, store) = open_temp_store();
        let user = UserStore::create(&store, "Asha").unwrap();
        let expense =
            ExpenseStore::create(&store, new_expense(user.user_id, date!(2024 - 01 - 05))).unwrap();

        let updated = store
            .update(
                expense.id,
                ExpensePatch {
                    category: Some("Travel".to_owned()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.category, "Travel");
        assert_eq!(updated.id, expense.id);
        assert_eq!(updated.created_at, expense.created_at);
        assert_eq!(updated.amount, expense.amount);
    }

    #[test]
    fn deleting_user_removes_their_expenses() {
        let (_dir, store) = open_temp_store();
        let user = UserStore::create(&store, "Asha").unwrap();
        let expense =
            ExpenseStore::create(&store, new_expense(user.user_id, date!(2024 - 01 - 05))).unwrap();

        UserStore::delete(&store, user.user_id).unwrap();

        assert_eq!(ExpenseStore::get(&store, expense.id), Err(Error::NotFound));
        assert_eq!(UserStore::delete(&store, user.user_id), Err(Error::NotFound));
    }
}
