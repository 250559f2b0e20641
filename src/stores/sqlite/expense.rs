//! Implements [ExpenseStore] for [SQLiteStore].

use rusqlite::{Connection, Row};

use crate::{
    Error,
    expense::{Expense, ExpenseId, ExpensePatch, NewExpense},
    stores::{ExpenseStore, SQLiteStore},
    timestamp,
    user::UserId,
};

const EXPENSE_COLUMNS: &str =
    "id, amount, category, payment_mode, date, notes, created_at, user_id";

impl ExpenseStore for SQLiteStore {
    fn list(&self, user_id: UserId) -> Result<Vec<Expense>, Error> {
        self.connection()?
            .prepare(&format!(
                "SELECT {EXPENSE_COLUMNS} FROM expense
                 WHERE user_id = :user_id
                 ORDER BY date DESC, id ASC"
            ))?
            .query_map(&[(":user_id", &user_id.as_i64())], map_expense_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::from))
            .collect()
    }

    fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        self.connection()?
            .prepare(&format!(
                "SELECT {EXPENSE_COLUMNS} FROM expense WHERE id = :id"
            ))?
            .query_row(&[(":id", &id.as_i64())], map_expense_row)
            .map_err(Error::from)
    }

    fn create(&self, expense: NewExpense) -> Result<Expense, Error> {
        let user_id = expense.user_id;

        self.connection()?
            .prepare(&format!(
                "INSERT INTO expense (amount, category, payment_mode, date, notes, created_at, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING {EXPENSE_COLUMNS}"
            ))?
            .query_row(
                (
                    expense.amount,
                    expense.category,
                    expense.payment_mode,
                    expense.date,
                    expense.notes,
                    timestamp::now(),
                    user_id.as_i64(),
                ),
                map_expense_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error {
                        code: _,
                        extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                    },
                    _,
                ) => Error::UnknownUser(user_id),
                error => error.into(),
            })
    }

    fn update(&self, id: ExpenseId, patch: ExpensePatch) -> Result<Expense, Error> {
        self.connection()?
            .prepare(&format!(
                "UPDATE expense
                 SET amount = COALESCE(?1, amount),
                     category = COALESCE(?2, category),
                     payment_mode = COALESCE(?3, payment_mode),
                     date = COALESCE(?4, date),
                     notes = COALESCE(?5, notes)
                 WHERE id = ?6
                 RETURNING {EXPENSE_COLUMNS}"
            ))?
            .query_row(
                (
                    patch.amount,
                    patch.category,
                    patch.payment_mode,
                    patch.date,
                    patch.notes,
                    id.as_i64(),
                ),
                map_expense_row,
            )
            .map_err(Error::from)
    }

    fn delete(&self, id: ExpenseId) -> Result<(), Error> {
        let rows_affected = self
            .connection()?
            .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id.as_i64())])?;

        match rows_affected {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub(crate) fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount > 0),
                category TEXT NOT NULL,
                payment_mode TEXT NOT NULL,
                date TEXT NOT NULL,
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES \"user\"(user_id) ON DELETE CASCADE
                )",
        (),
    )?;

    // Every read is scoped to one user and ordered by date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_user_date ON expense(user_id, date);",
        (),
    )?;

    Ok(())
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let payment_mode = row.get(3)?;
    let date = row.get(4)?;
    let notes = row.get(5)?;
    let created_at = row.get(6)?;
    let user_id = row.get(7)?;

    Ok(Expense {
        id: ExpenseId::new(id),
        amount,
        category,
        payment_mode,
        date,
        notes,
        created_at,
        user_id: UserId::new(user_id),
    })
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        Error, ExpenseId, ExpensePatch, NewExpense, UserId,
        stores::{ExpenseStore, SQLiteStore, UserStore, sqlite::get_test_store},
    };

    fn store_with_user() -> (SQLiteStore, UserId) {
        let store = get_test_store();
        let user = UserStore::create(&store, "Asha").unwrap();

        (store, user.user_id)
    }

    fn new_expense(user_id: UserId, amount: f64, date: Date) -> NewExpense {
        NewExpense {
            user_id,
            amount,
            category: "Travel".to_owned(),
            payment_mode: "Cash".to_owned(),
            date,
            notes: "taxi".to_owned(),
        }
    }

    #[test]
    fn create_assigns_id_and_creation_time() {
        let (store, user_id) = store_with_user();

        let expense =
            ExpenseStore::create(&store, new_expense(user_id, 12.3, date!(2024 - 01 - 05)))
                .unwrap();

        assert_eq!(expense.id, ExpenseId::new(1));
        assert_eq!(expense.amount, 12.3);
        assert_eq!(expense.notes, "taxi");
        assert_eq!(expense.user_id, user_id);
        assert_eq!(ExpenseStore::get(&store, expense.id), Ok(expense));
    }

    #[test]
    fn create_for_unknown_user_fails() {
        let store = get_test_store();
        let ghost = UserId::new(42);

        let result = ExpenseStore::create(&store, new_expense(ghost, 1.0, date!(2024 - 01 - 05)));

        assert_eq!(result, Err(Error::UnknownUser(ghost)));
    }

    #[test]
    fn list_is_scoped_to_user_and_newest_first() {
        let (store, user_id) = store_with_user();
        let other = UserStore::create(&store, "Ben").unwrap().user_id;
        let older =
            ExpenseStore::create(&store, new_expense(user_id, 1.0, date!(2024 - 01 - 05))).unwrap();
        let newer =
            ExpenseStore::create(&store, new_expense(user_id, 2.0, date!(2024 - 02 - 01))).unwrap();
        ExpenseStore::create(&store, new_expense(other, 3.0, date!(2024 - 03 - 01))).unwrap();

        let got = ExpenseStore::list(&store, user_id).unwrap();

        assert_eq!(got, vec![newer, older]);
    }

    #[test]
    fn update_changes_only_given_fields() {
        let (store, user_id) = store_with_user();
        let expense =
            ExpenseStore::create(&store, new_expense(user_id, 12.0, date!(2024 - 01 - 05)))
                .unwrap();

        let updated = store
            .update(
                expense.id,
                ExpensePatch {
                    amount: Some(20.0),
                    notes: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount, 20.0);
        assert_eq!(updated.notes, "");
        assert_eq!(updated.category, expense.category);
        assert_eq!(updated.date, expense.date);
        assert_eq!(updated.created_at, expense.created_at);
        assert_eq!(updated.user_id, expense.user_id);
    }

    #[test]
    fn update_missing_expense_is_not_found() {
        let store = get_test_store();

        let result = store.update(ExpenseId::new(7), ExpensePatch::default());

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_removes_expense() {
        let (store, user_id) = store_with_user();
        let expense =
            ExpenseStore::create(&store, new_expense(user_id, 12.0, date!(2024 - 01 - 05)))
                .unwrap();

        ExpenseStore::delete(&store, expense.id).unwrap();

        assert_eq!(ExpenseStore::get(&store, expense.id), Err(Error::NotFound));
        assert_eq!(
            ExpenseStore::delete(&store, expense.id),
            Err(Error::NotFound)
        );
    }
}
