//! The expenses page: a filter form, a summary line and a sortable table.

use std::collections::BTreeSet;

use axum::{
    extract::{RawQuery, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::ExpensesState,
    endpoints,
    expense::{
        EXPENSE_CATEGORIES, Expense, ExpenseFilters, ListSummary, ListView, PAYMENT_MODES,
        QuickRange, SortField, SortOrder, filter::filter_expenses, query::ExpenseListQuery,
    },
    html::{
        CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    timestamp,
};

/// Display a user's expenses using the same query parameters as the list endpoint.
///
/// `category` and `paymentMode` may also be repeated. Without a `userId` the
/// client is sent to the profile page.
pub async fn get_expenses_page(
    State(state): State<ExpensesState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, Error> {
    let query = ExpenseListQuery::from_query_string(raw_query.as_deref().unwrap_or_default())?;
    let Some(user_id) = query.user_id else {
        return Ok(Redirect::to(endpoints::USERS_VIEW).into_response());
    };
    let filters = query.filters(timestamp::today())?;
    let list_view = query.list_view();

    let expenses = state.expense_store.list(user_id)?;
    let filtered = filter_expenses(&expenses, &filters);
    let shown = list_view.apply(&filtered);
    let summary = ListSummary::new(&filtered, &shown);

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-6" { "Expenses" }

            (filter_form(&query, &filters))

            p id="list-summary" class="w-full text-sm text-gray-600 dark:text-gray-400 my-4"
            {
                (summary_text(&summary))
            }

            @if shown.is_empty() {
                (empty_state(expenses.is_empty()))
            } @else {
                (expense_table(&shown, &query, &list_view))
            }
        }
    );

    Ok(Html(base("Expenses", &[], &content).into_string()).into_response())
}

/// e.g. "Showing 2 expenses (filtered from 3) • Total: ₹80.00"
fn summary_text(summary: &ListSummary) -> String {
    let plural = if summary.shown == 1 { "" } else { "s" };
    let narrowed = if summary.is_narrowed() {
        format!(" (filtered from {})", summary.before_search)
    } else {
        String::new()
    };

    format!(
        "Showing {} expense{plural}{narrowed} • Total: {}",
        summary.shown,
        format_currency(summary.total_amount)
    )
}

fn filter_form(query: &ExpenseListQuery, filters: &ExpenseFilters) -> Markup {
    let active_count = filters.active_count();
    let categories = with_selected(&EXPENSE_CATEGORIES, &filters.categories);
    let payment_modes = with_selected(&PAYMENT_MODES, &filters.payment_modes);

    html!(
        form method="get" action=(endpoints::EXPENSES_VIEW) class="w-full flex flex-col gap-4"
        {
            @if let Some(user_id) = query.user_id {
                input type="hidden" name="userId" value=(user_id);
            }
            @if let Some(sort) = query.sort {
                input type="hidden" name="sort" value=(sort_value(sort));
            }
            @if let Some(order) = query.order {
                input type="hidden" name="order" value=(order_value(order));
            }

            div class="grid grid-cols-2 lg:grid-cols-5 gap-2"
            {
                select name="range" aria-label="Date range"
                {
                    option value="" { "Any time" }
                    @for range in QuickRange::ALL {
                        option value=(range.as_str()) selected[query.range == Some(range)]
                        {
                            (range.label())
                        }
                    }
                }

                input type="date" name="from" value=[query.from.as_deref()] aria-label="From";
                input type="date" name="to" value=[query.to.as_deref()] aria-label="To";

                input type="text" name="q" placeholder="Filter by text..."
                    value=[query.q.as_deref()] aria-label="Filter by text";

                input type="search" name="search" placeholder="Search expenses..."
                    value=[query.search.as_deref()];
            }

            (checkbox_group("Categories", "category", &categories, &filters.categories))
            (checkbox_group("Payment modes", "paymentMode", &payment_modes, &filters.payment_modes))

            div class="flex items-center gap-4"
            {
                button type="submit" class=(LINK_STYLE) { "Apply" }

                @if active_count > 0 {
                    span data-active-filters=(active_count) class="text-sm text-gray-600 dark:text-gray-400"
                    {
                        (active_count) " active filter" @if active_count != 1 { "s" }
                    }

                    @if let Some(user_id) = query.user_id {
                        a href=(format!("{}?userId={user_id}", endpoints::EXPENSES_VIEW))
                            class=(LINK_STYLE)
                        {
                            "Clear filters"
                        }
                    }
                }
            }
        }
    )
}

/// The offered values followed by any other selected values, e.g. a custom category.
fn with_selected(offered: &[&str], selected: &BTreeSet<String>) -> Vec<String> {
    offered
        .iter()
        .map(|value| (*value).to_owned())
        .chain(
            selected
                .iter()
                .filter(|value| !offered.contains(&value.as_str()))
                .cloned(),
        )
        .collect()
}

fn checkbox_group(
    legend: &str,
    name: &str,
    values: &[String],
    selected: &BTreeSet<String>,
) -> Markup {
    html!(
        fieldset class="flex flex-wrap gap-3 text-sm"
        {
            legend class="font-medium mr-2" { (legend) }

            @for value in values {
                label class="inline-flex items-center gap-1"
                {
                    input type="checkbox" name=(name) value=(value)
                        checked[selected.contains(value)];
                    (value)
                }
            }
        }
    )
}

fn sort_value(field: SortField) -> &'static str {
    match field {
        SortField::Date => "date",
        SortField::Amount => "amount",
        SortField::Category => "category",
    }
}

fn order_value(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "asc",
        SortOrder::Desc => "desc",
    }
}

fn expense_table(expenses: &[Expense], query: &ExpenseListQuery, list_view: &ListView) -> Markup {
    html!(
        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    (sort_header("Date", SortField::Date, query, list_view))
                    (sort_header("Amount", SortField::Amount, query, list_view))
                    (sort_header("Category", SortField::Category, query, list_view))
                    th scope="col" class=(TABLE_CELL_STYLE) { "Payment Mode" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Notes" }
                }
            }

            tbody
            {
                @for expense in expenses {
                    tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
                    {
                        td class=(TABLE_CELL_STYLE) { (expense.date) }
                        td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
                        td class=(TABLE_CELL_STYLE)
                        {
                            span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
                        }
                        td class=(TABLE_CELL_STYLE) { (expense.payment_mode) }
                        td class=(TABLE_CELL_STYLE) { (expense.notes) }
                    }
                }
            }
        }
    )
}

fn sort_header(
    label: &str,
    field: SortField,
    query: &ExpenseListQuery,
    list_view: &ListView,
) -> Markup {
    let toggled = list_view.clone().toggle_sort(field);
    let link_query = ExpenseListQuery {
        sort: Some(toggled.sort_field),
        order: Some(toggled.sort_order),
        ..query.clone()
    };
    let href = match serde_urlencoded::to_string(&link_query) {
        Ok(query_string) => format!("{}?{query_string}", endpoints::EXPENSES_VIEW),
        Err(error) => {
            tracing::error!("could not encode sort link: {error}");
            endpoints::EXPENSES_VIEW.to_owned()
        }
    };

    let indicator = match (list_view.sort_field == field, list_view.sort_order) {
        (true, SortOrder::Asc) => " ▲",
        (true, SortOrder::Desc) => " ▼",
        (false, _) => "",
    };

    html!(
        th scope="col" class=(TABLE_CELL_STYLE)
        {
            a href=(href) class=(LINK_STYLE) data-sort=(label) { (label) (indicator) }
        }
    )
}

fn empty_state(no_expenses_at_all: bool) -> Markup {
    let hint = if no_expenses_at_all {
        "Start adding expenses to see them here."
    } else {
        "Try adjusting your filters or search terms to find the expenses you're looking for."
    };

    html!(
        div id="empty-state" class="text-center py-12"
        {
            h3 class="text-lg font-medium mb-2" { "No expenses found" }
            p class="text-sm text-gray-500" { (hint) }
        }
    )
}
