//! Groups expenses into per-month, per-category totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::expense::Expense;

/// The spending of one calendar month, broken down by category.
///
/// Serializes flat, e.g. `{"month": "2024-01", "Travel": 80.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// The month as `YYYY-MM`.
    pub month: String,
    /// The amount spent per category. Only categories with spending appear.
    #[serde(flatten)]
    pub totals: BTreeMap<String, f64>,
}

impl MonthBucket {
    /// The amount spent across all categories in the month.
    pub fn total(&self) -> f64 {
        self.totals.values().sum()
    }
}

/// The `YYYY-MM` key of the month containing `date`.
pub fn month_key(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

/// Sum `expenses` by month and category.
///
/// Buckets are sorted by month, oldest first. Amounts are added as they are,
/// without rounding.
///
/// The amounts of each cell are summed in ascending order, so the result only
/// depends on which expenses are given and not on their order.
pub fn aggregate(expenses: &[Expense]) -> Vec<MonthBucket> {
    let mut months: BTreeMap<String, BTreeMap<String, Vec<f64>>> = BTreeMap::new();

    for expense in expenses {
        months
            .entry(month_key(expense.date))
            .or_default()
            .entry(expense.category.clone())
            .or_default()
            .push(expense.amount);
    }

    months
        .into_iter()
        .map(|(month, cells)| MonthBucket {
            month,
            totals: cells
                .into_iter()
                .map(|(category, amounts)| (category, sum_sorted(amounts)))
                .collect(),
        })
        .collect()
}

/// Sum `amounts` in ascending order.
pub(crate) fn sum_sorted(mut amounts: Vec<f64>) -> f64 {
    amounts.sort_by(f64::total_cmp);
    amounts.into_iter().sum()
}
