//! Shared HTML building blocks for the server-rendered pages.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};

pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

pub const CATEGORY_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-blue-800 bg-blue-100 rounded-full \
    dark:bg-blue-900 dark:text-blue-300";

pub const CARD_STYLE: &str = "p-6 bg-white rounded-lg shadow dark:bg-gray-800";

pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

const TAILWIND_SCRIPT: &str = "https://cdn.tailwindcss.com";
pub const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

pub enum HeadElement {
    /// The URL of a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Spendwise" }
                script src=(TAILWIND_SCRIPT) {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (navigation())
                (content)
            }
        }
    }
}

fn navigation() -> Markup {
    html! {
        nav class="flex gap-6 px-6 py-4 bg-white dark:bg-gray-800 shadow"
        {
            span class="font-semibold text-gray-900 dark:text-white" { "Spendwise" }
            a href="/users" class=(LINK_STYLE) { "Profiles" }
            a href="/expenses" class=(LINK_STYLE) { "Expenses" }
            a href="/analytics" class=(LINK_STYLE) { "Analytics" }
        }
    }
}

/// Format `number` as rupees with two decimal places, e.g. "₹1,234.50".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();
    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| currency_formatter("₹"));
    let negative_fmt = NEGATIVE_FMT.get_or_init(|| currency_formatter("-₹"));

    let formatted = match (positive_fmt, negative_fmt) {
        (Some(positive_fmt), _) if number > 0.0 => positive_fmt.fmt_string(number),
        (_, Some(negative_fmt)) if number < 0.0 => negative_fmt.fmt_string(number.abs()),
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        _ if number == 0.0 => return "₹0.00".to_owned(),
        _ => return format!("₹{number:.2}"),
    };

    pad_decimals(formatted)
}

fn currency_formatter(prefix: &str) -> Option<Formatter> {
    Formatter::currency(prefix)
        .inspect_err(|error| tracing::error!("could not create currency formatter: {error:?}"))
        .ok()
        .map(|formatter| formatter.precision(Precision::Decimals(2)))
}

/// numfmt drops trailing zeros, e.g. "12.30" is rendered as "12.3".
fn pad_decimals(formatted: String) -> String {
    match formatted.rsplit_once('.') {
        Some((_, decimals)) if decimals.len() == 1 => format!("{formatted}0"),
        Some(_) => formatted,
        None => format!("{formatted}.00"),
    }
}
