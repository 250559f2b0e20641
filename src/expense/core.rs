//! Defines the expense model and the validation applied before it is stored.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, macros::format_description};

use crate::{Error, user::UserId};

// ============================================================================
// ENUMERATIONS
// ============================================================================

/// The categories offered by the presentation layer.
///
/// Other values are accepted when creating an expense, they are simply not
/// listed here.
pub const EXPENSE_CATEGORIES: [&str; 9] = [
    "Rental",
    "Groceries",
    "Travel",
    "Entertainment",
    "Bills & Utilities",
    "Investment",
    "Healthcare",
    "Education",
    "Other",
];

/// The payment modes offered by the presentation layer.
pub const PAYMENT_MODES: [&str; 6] = [
    "UPI",
    "Cash",
    "Credit Card",
    "Debit Card",
    "Net Banking",
    "Other",
];

// ============================================================================
// MODELS
// ============================================================================

/// A newtype wrapper for expense IDs.
///
/// Clients should treat the ID as opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    /// Create a new expense ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the expense ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A single spending event owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Assigned by the store on creation.
    pub id: ExpenseId,
    /// How much was spent. Always greater than zero.
    pub amount: f64,
    /// What the money was spent on, e.g. "Groceries".
    pub category: String,
    /// How the expense was paid, e.g. "Cash".
    pub payment_mode: String,
    /// When the expense occurred, not when it was recorded.
    pub date: Date,
    /// A free-text annotation.
    #[serde(default)]
    pub notes: String,
    /// When the expense was recorded. Set by the store.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// The owner of the expense.
    pub user_id: UserId,
}

/// A validated expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The owner of the expense.
    pub user_id: UserId,
    /// How much was spent. Always greater than zero.
    pub amount: f64,
    /// What the money was spent on.
    pub category: String,
    /// How the expense was paid.
    pub payment_mode: String,
    /// When the expense occurred.
    pub date: Date,
    /// A free-text annotation.
    pub notes: String,
}

impl NewExpense {
    /// Attach the store-assigned fields.
    pub(crate) fn into_expense(self, id: ExpenseId, created_at: OffsetDateTime) -> Expense {
        Expense {
            id,
            amount: self.amount,
            category: self.category,
            payment_mode: self.payment_mode,
            date: self.date,
            notes: self.notes,
            created_at,
            user_id: self.user_id,
        }
    }
}

/// A validated partial update. `None` leaves the field unchanged.
///
/// The ID, owner and creation time of an expense can never be changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    /// The new amount.
    pub amount: Option<f64>,
    /// The new category.
    pub category: Option<String>,
    /// The new payment mode.
    pub payment_mode: Option<String>,
    /// The new date.
    pub date: Option<Date>,
    /// The new notes.
    pub notes: Option<String>,
}

impl ExpensePatch {
    /// Return a copy of `expense` with the patched fields replaced.
    pub fn apply_to(&self, expense: &Expense) -> Expense {
        Expense {
            amount: self.amount.unwrap_or(expense.amount),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| expense.category.clone()),
            payment_mode: self
                .payment_mode
                .clone()
                .unwrap_or_else(|| expense.payment_mode.clone()),
            date: self.date.unwrap_or(expense.date),
            notes: self.notes.clone().unwrap_or_else(|| expense.notes.clone()),
            ..expense.clone()
        }
    }
}

// ============================================================================
// REQUEST BODIES
// ============================================================================

/// The JSON body for creating an expense.
///
/// Every field is optional here so that a missing field is reported as a
/// validation error naming the field rather than a generic parse failure.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub payment_mode: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
    pub user_id: Option<UserId>,
}

impl CreateExpenseRequest {
    /// Validate the request.
    ///
    /// # Errors
    /// Returns [Error::Validation] if a required field is missing or invalid.
    pub fn validate(self) -> Result<NewExpense, Error> {
        let user_id = self
            .user_id
            .ok_or_else(|| Error::validation("userId is required"))?;
        let amount = self
            .amount
            .ok_or_else(|| Error::validation("amount is required"))
            .and_then(validate_amount)?;
        let category = validate_label("category", self.category)?;
        let payment_mode = validate_label("paymentMode", self.payment_mode)?;
        let date = self
            .date
            .ok_or_else(|| Error::validation("date is required"))
            .and_then(|date| parse_date(&date))?;

        Ok(NewExpense {
            user_id,
            amount,
            category,
            payment_mode,
            date,
            notes: self.notes.unwrap_or_default(),
        })
    }
}

/// The JSON body for updating an expense.
///
/// Fields that cannot be changed (`id`, `createdAt`, `userId`) are ignored if present.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub payment_mode: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

impl UpdateExpenseRequest {
    /// Validate the fields that are present.
    ///
    /// # Errors
    /// Returns [Error::Validation] if a present field is invalid.
    pub fn validate(self) -> Result<ExpensePatch, Error> {
        Ok(ExpensePatch {
            amount: self.amount.map(validate_amount).transpose()?,
            category: self
                .category
                .map(|category| validate_label("category", Some(category)))
                .transpose()?,
            payment_mode: self
                .payment_mode
                .map(|mode| validate_label("paymentMode", Some(mode)))
                .transpose()?,
            date: self.date.map(|date| parse_date(&date)).transpose()?,
            notes: self.notes,
        })
    }
}

fn validate_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::validation("amount must be a positive number"))
    }
}

fn validate_label(field: &str, value: Option<String>) -> Result<String, Error> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_owned()),
        _ => Err(Error::validation(format!("{field} is required"))),
    }
}

/// Parse an ISO calendar date.
///
/// Accepts `YYYY-MM-DD`, optionally followed by a time part (`2024-01-05T00:00:00Z`),
/// which is discarded.
///
/// # Errors
/// Returns [Error::Validation] if `text` does not start with a valid calendar date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let date_part = match text.split_once('T') {
        Some((date_part, _)) => date_part,
        None => text,
    };

    Date::parse(date_part.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::validation(format!("\"{text}\" is not a valid date")))
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{Error, UserId};

    use super::{
        CreateExpenseRequest, Expense, ExpenseId, ExpensePatch, UpdateExpenseRequest, parse_date,
    };

    fn valid_request() -> CreateExpenseRequest {
        CreateExpenseRequest {
            amount: Some(50.0),
            category: Some("Travel".to_owned()),
            payment_mode: Some("Cash".to_owned()),
            date: Some("2024-01-05".to_owned()),
            notes: None,
            user_id: Some(UserId::new(1)),
        }
    }

    #[test]
    fn valid_request_defaults_notes_to_empty() {
        let expense = valid_request().validate().unwrap();

        assert_eq!(expense.amount, 50.0);
        assert_eq!(expense.date, date!(2024 - 01 - 05));
        assert_eq!(expense.notes, "");
    }

    #[test]
    fn rejects_missing_user() {
        let request = CreateExpenseRequest {
            user_id: None,
            ..valid_request()
        };

        assert_eq!(
            request.validate(),
            Err(Error::Validation("userId is required".to_owned()))
        );
    }

    #[test]
    fn rejects_non_positive_amounts() {
        for amount in [0.0, -12.5, f64::NAN, f64::INFINITY] {
            let request = CreateExpenseRequest {
                amount: Some(amount),
                ..valid_request()
            };

            assert!(
                matches!(request.validate(), Err(Error::Validation(_))),
                "amount {amount} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_blank_category() {
        let request = CreateExpenseRequest {
            category: Some("  ".to_owned()),
            ..valid_request()
        };

        assert_eq!(
            request.validate(),
            Err(Error::Validation("category is required".to_owned()))
        );
    }

    #[test]
    fn rejects_missing_payment_mode() {
        let request = CreateExpenseRequest {
            payment_mode: None,
            ..valid_request()
        };

        assert_eq!(
            request.validate(),
            Err(Error::Validation("paymentMode is required".to_owned()))
        );
    }

    #[test]
    fn parses_dates_with_time_part() {
        assert_eq!(
            parse_date("2024-02-29T10:00:00.000Z").unwrap(),
            date!(2024 - 02 - 29)
        );
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn update_validates_only_present_fields() {
        let patch = UpdateExpenseRequest {
            notes: Some("taxi".to_owned()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert_eq!(
            patch,
            ExpensePatch {
                notes: Some("taxi".to_owned()),
                ..Default::default()
            }
        );

        let invalid = UpdateExpenseRequest {
            amount: Some(-1.0),
            ..Default::default()
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn patch_keeps_immutable_fields() {
        let expense = Expense {
            id: ExpenseId::new(7),
            amount: 10.0,
            category: "Groceries".to_owned(),
            payment_mode: "UPI".to_owned(),
            date: date!(2024 - 03 - 01),
            notes: "milk".to_owned(),
            created_at: datetime!(2024-03-01 12:00 UTC),
            user_id: UserId::new(2),
        };
        let patch = ExpensePatch {
            amount: Some(12.0),
            category: Some("Other".to_owned()),
            ..Default::default()
        };

        let updated = patch.apply_to(&expense);

        assert_eq!(updated.amount, 12.0);
        assert_eq!(updated.category, "Other");
        assert_eq!(updated.payment_mode, "UPI");
        assert_eq!(updated.notes, "milk");
        assert_eq!(updated.id, expense.id);
        assert_eq!(updated.user_id, expense.user_id);
        assert_eq!(updated.created_at, expense.created_at);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let expense = Expense {
            id: ExpenseId::new(1),
            amount: 50.0,
            category: "Travel".to_owned(),
            payment_mode: "Cash".to_owned(),
            date: date!(2024 - 01 - 05),
            notes: String::new(),
            created_at: datetime!(2024-01-05 08:30 UTC),
            user_id: UserId::new(1),
        };

        let json = serde_json::to_value(&expense).unwrap();

        assert_eq!(json["paymentMode"], "Cash");
        assert_eq!(json["date"], "2024-01-05");
        assert_eq!(json["userId"], 1);
        assert_eq!(json["createdAt"], "2024-01-05T08:30:00Z");
    }
}
