//! The analytics page: summary cards above the monthly expenses chart.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::{Html, IntoResponse, Redirect, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    analytics::{
        AnalyticsSummary,
        charts::{EXPENSES_CHART_ID, chart_container, chart_script, expenses_chart},
        handlers::{AnalyticsQuery, load_analytics},
    },
    app_state::ExpensesState,
    endpoints,
    html::{CARD_STYLE, ECHARTS_SCRIPT, HeadElement, PAGE_CONTAINER_STYLE, base, format_currency},
};

/// Display a user's headline figures and spending per month.
///
/// Without a `userId` the client is sent to the profile page.
pub async fn get_analytics_page(
    State(state): State<ExpensesState>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(query) = query?;
    if query.user_id.is_none() {
        return Ok(Redirect::to(endpoints::USERS_VIEW).into_response());
    }
    let (expenses, buckets) = load_analytics(&state, &query)?;
    let summary = AnalyticsSummary::from_expenses(&expenses, &buckets);

    if buckets.is_empty() {
        return Ok(Html(analytics_view(&summary, None, &[]).into_string()).into_response());
    }

    let chart = expenses_chart(&buckets);
    let head_elements = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        chart_script(EXPENSES_CHART_ID, &chart),
    ];

    Ok(Html(
        analytics_view(&summary, Some(chart_container(EXPENSES_CHART_ID)), &head_elements)
            .into_string(),
    )
    .into_response())
}

fn analytics_view(
    summary: &AnalyticsSummary,
    chart: Option<Markup>,
    head_elements: &[HeadElement],
) -> Markup {
    let top_category = match &summary.top_category {
        Some(top) => (top.category.clone(), format_currency(top.amount)),
        None => ("No data".to_owned(), String::new()),
    };

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-6" { "Analytics" }

            section class="grid grid-cols-1 md:grid-cols-3 gap-4 w-full mb-8"
            {
                (card("Total Spent", &format_currency(summary.total_spent), "All time"))
                (card(
                    "Monthly Average",
                    &format_currency(summary.monthly_average),
                    &format!("Over {} months", summary.month_count),
                ))
                (card("Top Category", &top_category.0, &top_category.1))
            }

            @match chart {
                Some(chart) => { (chart) }
                None => { p data-empty-state { "No expenses recorded yet." } }
            }
        }
    );

    base("Analytics", head_elements, &content)
}

fn card(title: &str, value: &str, caption: &str) -> Markup {
    html!(
        div class=(CARD_STYLE) data-card=(title)
        {
            h2 class="text-sm font-medium text-gray-500 dark:text-gray-400" { (title) }
            p class="text-2xl font-bold" { (value) }
            p class="text-xs text-gray-500 dark:text-gray-400" { (caption) }
        }
    )
}
