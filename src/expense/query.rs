//! Translates the query string of the expense list into filters and a list view.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    expense::{
        DateRange, ExpenseFilters, ListView, QuickRange, SortField, SortOrder, core::parse_date,
    },
    user::UserId,
};

/// The query parameters accepted by the expense list endpoint and page.
///
/// `category` and `paymentMode` take comma separated lists.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<QuickRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<String>,
    /// The filter engine's search query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// The list view's search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

/// Keys whose repeated values are joined into one comma separated list.
const LIST_KEYS: [&str; 2] = ["category", "paymentMode"];

impl ExpenseListQuery {
    /// Parse a query string as sent by the filter form.
    ///
    /// Checkboxes repeat `category` and `paymentMode` once per ticked value,
    /// these are joined with commas. Empty values are treated as absent.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the query string is malformed.
    pub fn from_query_string(query: &str) -> Result<Self, Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|error| Error::validation(format!("invalid query string: {error}")))?;

        let mut merged: Vec<(String, String)> = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            if value.trim().is_empty() {
                continue;
            }

            let is_list = LIST_KEYS.contains(&key.as_str());
            match merged.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, existing)) if is_list => {
                    existing.push(',');
                    existing.push_str(&value);
                }
                Some((_, existing)) => *existing = value,
                None => merged.push((key, value)),
            }
        }

        serde_urlencoded::to_string(&merged)
            .map_err(|error| error.to_string())
            .and_then(|normalized| {
                serde_urlencoded::from_str(&normalized).map_err(|error| error.to_string())
            })
            .map_err(|error| Error::validation(format!("invalid query string: {error}")))
    }

    /// The user whose expenses are requested.
    ///
    /// # Errors
    /// Returns [Error::Validation] if `userId` is missing.
    pub fn user_id(&self) -> Result<UserId, Error> {
        self.user_id
            .ok_or_else(|| Error::validation("userId is required"))
    }

    /// Build the filters described by the query.
    ///
    /// A quick `range` is resolved against `today`; explicit `from`/`to`
    /// bounds take precedence over it.
    ///
    /// # Errors
    /// Returns [Error::Validation] if `from` or `to` is not a valid date.
    pub fn filters(&self, today: Date) -> Result<ExpenseFilters, Error> {
        let quick_range = self
            .range
            .map(|range| range.resolve(today))
            .unwrap_or_default();

        let date_range = DateRange {
            from: parse_optional_date(self.from.as_deref())?.or(quick_range.from),
            to: parse_optional_date(self.to.as_deref())?.or(quick_range.to),
        };

        Ok(ExpenseFilters {
            date_range,
            categories: split_list(self.category.as_deref()),
            payment_modes: split_list(self.payment_mode.as_deref()),
            search_query: self.q.clone().unwrap_or_default(),
        })
    }

    /// Build the list view described by the query.
    pub fn list_view(&self) -> ListView {
        ListView {
            search_term: self.search.clone().unwrap_or_default(),
            sort_field: self.sort.unwrap_or_default(),
            sort_order: self.order.unwrap_or_default(),
        }
    }
}

fn parse_optional_date(text: Option<&str>) -> Result<Option<Date>, Error> {
    match text {
        Some(text) if !text.trim().is_empty() => parse_date(text).map(Some),
        _ => Ok(None),
    }
}

fn split_list<C: FromIterator<String>>(text: Option<&str>) -> C {
    text.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use time::macros::date;

    use crate::{
        Error, UserId,
        expense::{DateRange, QuickRange, SortField, SortOrder},
    };

    use super::ExpenseListQuery;

    #[test]
    fn parses_comma_separated_lists() {
        let query = ExpenseListQuery {
            category: Some("Travel, Groceries,,".to_owned()),
            payment_mode: Some("Credit Card".to_owned()),
            ..Default::default()
        };

        let filters = query.filters(date!(2024 - 06 - 01)).unwrap();

        let want: BTreeSet<String> = ["Groceries".to_owned(), "Travel".to_owned()].into();
        assert_eq!(filters.categories, want);
        assert_eq!(filters.payment_modes.len(), 1);
    }

    #[test]
    fn explicit_bounds_override_quick_range() {
        let query = ExpenseListQuery {
            range: Some(QuickRange::ThisMonth),
            to: Some("2024-06-10".to_owned()),
            ..Default::default()
        };

        let filters = query.filters(date!(2024 - 06 - 20)).unwrap();

        assert_eq!(
            filters.date_range,
            DateRange {
                from: Some(date!(2024 - 06 - 01)),
                to: Some(date!(2024 - 06 - 10)),
            }
        );
    }

    #[test]
    fn empty_query_is_unrestricted() {
        let query = ExpenseListQuery::default();

        assert_eq!(query.filters(date!(2024 - 06 - 20)).unwrap().active_count(), 0);
        let list_view = query.list_view();
        assert_eq!(list_view.sort_field, SortField::Date);
        assert_eq!(list_view.sort_order, SortOrder::Desc);
    }

    #[test]
    fn invalid_bound_is_a_validation_error() {
        let query = ExpenseListQuery {
            from: Some("soon".to_owned()),
            ..Default::default()
        };

        assert!(matches!(
            query.filters(date!(2024 - 06 - 20)),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn joins_repeated_list_keys_and_drops_empty_values() {
        let query = ExpenseListQuery::from_query_string(
            "userId=2&category=Travel&category=Bills+%26+Utilities&paymentMode=UPI&range=&q=",
        )
        .unwrap();

        assert_eq!(query.user_id, Some(UserId::new(2)));
        assert_eq!(query.category.as_deref(), Some("Travel,Bills & Utilities"));
        assert_eq!(query.payment_mode.as_deref(), Some("UPI"));
        assert_eq!(query.range, None);
        assert_eq!(query.q, None);
    }

    #[test]
    fn parses_quick_range_from_query_string() {
        let query =
            ExpenseListQuery::from_query_string("userId=1&range=last-month&sort=amount").unwrap();

        assert_eq!(query.range, Some(QuickRange::LastMonth));
        assert_eq!(query.sort, Some(SortField::Amount));
    }

    #[test]
    fn malformed_query_string_is_a_validation_error() {
        assert!(matches!(
            ExpenseListQuery::from_query_string("userId=abc"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn user_id_is_required() {
        assert!(ExpenseListQuery::default().user_id().is_err());

        let query = ExpenseListQuery {
            user_id: Some(UserId::new(4)),
            ..Default::default()
        };
        assert_eq!(query.user_id(), Ok(UserId::new(4)));
    }
}
