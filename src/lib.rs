//! Fintrack is a personal finance tracker served as a JSON API.
//!
//! Users record income and expense transactions and per-category monthly
//! budgets, and query aggregated analytics: a dashboard summary, a category
//! breakdown, a monthly trend and a budget-vs-actual comparison.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use time::Date;
use tokio::signal;

mod analytics;
mod app_state;
mod budget;
mod category;
mod database_id;
mod db;
mod endpoints;
mod pagination;
mod period;
mod response;
mod routing;
#[cfg(test)]
mod test_utils;
mod transaction;

pub use app_state::AppState;
pub use budget::{Budget, BudgetDraft, create_budget};
pub use category::{Category, TransactionType};
pub use db::initialize as initialize_db;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use transaction::{Transaction, TransactionDraft, create_transaction};

use crate::response::ApiError;

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A zero or negative amount was used to create a transaction.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    InvalidAmount(f64),

    /// A negative amount was used to create a budget.
    #[error("{0} is not a valid budget amount, budget amounts must not be negative")]
    InvalidBudgetAmount(f64),

    /// An empty string was used as a transaction description.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// A transaction description exceeded the maximum length.
    ///
    /// The value is the length of the rejected description in characters.
    #[error("description cannot exceed 200 characters, got {0}")]
    DescriptionTooLong(usize),

    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore
    /// future dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// A month outside 1-12 was used in a request.
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u8),

    /// A year outside the supported range was used in a request.
    #[error("{0} is not a valid year")]
    InvalidYear(i32),

    /// A budget already exists for the requested (category, month, year).
    #[error("a budget already exists for this category and month")]
    DuplicateBudget,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::DuplicateBudget => StatusCode::CONFLICT,
            Error::DatabaseLock | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        // Storage failures are logged server-side and replaced with a generic
        // message so internals never leak to the client.
        let message = match &self {
            Error::DatabaseLock | Error::SqlError(_) => {
                tracing::error!("an unexpected error occurred: {self}");
                "internal server error".to_owned()
            }
            error => error.to_string(),
        };

        (status, Json(ApiError::new(message))).into_response()
    }
}
