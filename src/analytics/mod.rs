//! Monthly spending analytics.
//!
//! This module contains:
//! - The aggregator that groups expenses into per-month, per-category buckets
//! - Summary figures (total, monthly average, top category)
//! - The JSON endpoints and the HTML page with a stacked bar chart

mod aggregation;
mod charts;
mod handlers;
mod page;
mod summary;

pub use aggregation::{MonthBucket, aggregate};
pub use handlers::{get_analytics_endpoint, get_analytics_summary_endpoint};
pub use page::get_analytics_page;
pub use summary::{AnalyticsSummary, CategoryTotal};
