#![allow(missing_docs)]

use time::{Date, macros::datetime};

use crate::{
    expense::{Expense, ExpenseId},
    user::UserId,
};

/// Build an expense owned by user 1.
pub(crate) fn expense(
    id: i64,
    amount: f64,
    category: &str,
    payment_mode: &str,
    date: Date,
    notes: &str,
) -> Expense {
    Expense {
        id: ExpenseId::new(id),
        amount,
        category: category.to_owned(),
        payment_mode: payment_mode.to_owned(),
        date,
        notes: notes.to_owned(),
        created_at: datetime!(2024-02-02 09:00 UTC),
        user_id: UserId::new(1),
    }
}

/// Two Travel expenses in January and one Groceries expense in February.
pub(crate) fn scenario_expenses() -> Vec<Expense> {
    use time::macros::date;

    vec![
        expense(1, 50.0, "Travel", "Cash", date!(2024 - 01 - 05), ""),
        expense(2, 30.0, "Travel", "UPI", date!(2024 - 01 - 20), ""),
        expense(3, 20.0, "Groceries", "Cash", date!(2024 - 02 - 01), ""),
    ]
}
