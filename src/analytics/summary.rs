//! Headline figures for the analytics page.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    analytics::{MonthBucket, aggregation::sum_sorted},
    expense::Expense,
};

/// The category with the most spending and how much was spent on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The all-time amount spent in the category.
    pub amount: f64,
}

/// Summary statistics over all of a user's expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// The sum of every expense.
    pub total_spent: f64,
    /// The number of months that have at least one expense.
    pub month_count: usize,
    /// The average spend over the months with expenses. Zero if there are none.
    pub monthly_average: f64,
    /// The category with the largest total, `None` without expenses.
    pub top_category: Option<CategoryTotal>,
}

impl AnalyticsSummary {
    /// Summarise `expenses`, where `buckets` is the result of
    /// [crate::aggregate] on the same expenses.
    pub fn from_expenses(expenses: &[Expense], buckets: &[MonthBucket]) -> Self {
        let total_spent = sum_sorted(expenses.iter().map(|expense| expense.amount).collect());
        let month_count = buckets.len();
        let monthly_average = if month_count == 0 {
            0.0
        } else {
            sum_sorted(buckets.iter().map(MonthBucket::total).collect()) / month_count as f64
        };

        Self {
            total_spent,
            month_count,
            monthly_average,
            top_category: top_category(expenses),
        }
    }
}

fn top_category(expenses: &[Expense]) -> Option<CategoryTotal> {
    let mut amounts: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for expense in expenses {
        amounts
            .entry(expense.category.as_str())
            .or_default()
            .push(expense.amount);
    }
    let totals = amounts
        .into_iter()
        .map(|(category, amounts)| (category, sum_sorted(amounts)));

    // Iterating in name order and only replacing on a strictly larger amount
    // keeps the alphabetically first category on ties.
    let mut top: Option<(&str, f64)> = None;
    for (category, amount) in totals {
        if top.is_none_or(|(_, top_amount)| amount > top_amount) {
            top = Some((category, amount));
        }
    }

    top.map(|(category, amount)| CategoryTotal {
        category: category.to_owned(),
        amount,
    })
}
