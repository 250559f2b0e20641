//! Chart generation and rendering for the analytics page.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with an HTML container and JavaScript initialization code.

use std::collections::BTreeSet;

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Tooltip, Trigger,
    },
    series::bar,
};
use maud::{Markup, PreEscaped, html};
use time::Month;

use crate::{analytics::MonthBucket, html::HeadElement};

/// The HTML element ID of the monthly expenses chart.
pub(super) const EXPENSES_CHART_ID: &str = "monthly-expenses-chart";

/// Renders the HTML container for the chart with `id`.
pub(super) fn chart_container(id: &str) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div
                id=(id)
                class="min-h-[380px] rounded dark:bg-gray-100"
            {}
        }
    )
}

/// Generates JavaScript that initializes an ECharts instance for the
/// container `id` with dark mode support and responsive resizing.
pub(super) fn chart_script(id: &str, chart: &Chart) -> HeadElement {
    let chart = escape_for_script(&chart.to_string());
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{id}");
            const chart = echarts.init(chartDom);
            const option = {chart};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

/// Escape the characters that could end an inline `<script>` element.
///
/// Category names are user input and end up in string literals of the chart
/// options, where `\u003c` and friends decode back to the original text. The
/// formatter functions must not contain these characters.
fn escape_for_script(options: &str) -> String {
    options
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// A stacked bar chart with one bar per month and one series per category.
pub(super) fn expenses_chart(buckets: &[MonthBucket]) -> Chart {
    let labels: Vec<String> = buckets
        .iter()
        .map(|bucket| format_month_label(&bucket.month))
        .collect();

    let mut chart = Chart::new()
        .title(
            Title::new()
                .text("Monthly Expenses")
                .subtext("Grouped by category")
                .left(20)
                .top("1%"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(90)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        );

    for (category, data) in series_by_category(buckets) {
        chart = chart.series(
            bar::Bar::new()
                .name(category)
                .stack("Expenses")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(data),
        );
    }

    chart
}

/// One series per category that has spending, with a gap (`None`) for months
/// without spending in that category.
fn series_by_category(buckets: &[MonthBucket]) -> Vec<(String, Vec<Option<f64>>)> {
    let categories: BTreeSet<&String> = buckets
        .iter()
        .flat_map(|bucket| bucket.totals.iter())
        .filter(|(_, amount)| **amount != 0.0)
        .map(|(category, _)| category)
        .collect();

    categories
        .into_iter()
        .map(|category| {
            let data = buckets
                .iter()
                .map(|bucket| bucket.totals.get(category).copied())
                .collect();

            (category.clone(), data)
        })
        .collect()
}

/// Format a `YYYY-MM` month key as e.g. "Jan 24".
///
/// Keys that cannot be parsed are returned unchanged.
fn format_month_label(month: &str) -> String {
    let Some((year, month_number)) = month.split_once('-') else {
        return month.to_owned();
    };

    let Some(month) = month_number
        .parse::<u8>()
        .ok()
        .and_then(|number| Month::try_from(number).ok())
    else {
        return month.to_owned();
    };

    let abbreviation = match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    };

    let short_year = year.get(year.len().saturating_sub(2)..).unwrap_or(year);

    format!("{abbreviation} {short_year}")
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-IN', {
              style: 'currency',
              currency: 'INR'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
