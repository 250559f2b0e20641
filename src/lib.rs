//! Spendwise is a web service for tracking personal expenses.
//!
//! Users record expenses (amount, category, date, payment mode, notes), browse
//! and filter their history, and view monthly spending per category.
//!
//! This library provides a JSON REST API over a swappable expense repository,
//! along with the pure filtering, sorting and aggregation functions that the
//! API and any other presentation layer are built on.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod analytics;
mod app_state;
mod config;
mod db;
mod endpoints;
mod error;
mod expense;
mod html;
mod logging;
mod not_found;
mod routing;
mod session;
mod stores;
mod timestamp;
mod user;

pub use analytics::{AnalyticsSummary, CategoryTotal, MonthBucket, aggregate};
pub use app_state::AppState;
pub use config::{StoreKind, open_stores};
pub use db::initialize as initialize_db;
pub use error::{Error, ErrorKind};
pub use expense::{
    DateRange, EXPENSE_CATEGORIES, Expense, ExpenseAction, ExpenseFilters, ExpenseId,
    ExpensePatch, ExpenseState, FilterUpdate, ListSummary, ListView, NewExpense, PAYMENT_MODES,
    QuickRange, SortField, SortOrder, filter_expenses,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use session::Session;
pub use stores::{ExpenseStore, JsonFileStore, SQLiteStore, UserStore};
pub use user::{User, UserId};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate_signal) => {
                terminate_signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
