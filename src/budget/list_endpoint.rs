//! Defines the endpoint for listing budgets.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    budget::core::{BudgetFilter, list_budgets},
    category::Category,
    period::{MonthOfYear, validate_month, validate_year},
    response::ApiResponse,
};

/// The query parameters accepted by the budget listing.
#[derive(Debug, Deserialize)]
pub struct BudgetListParams {
    /// Only include budgets for this month.
    pub month: Option<u8>,
    /// Only include budgets for this year.
    pub year: Option<i32>,
    /// Only include budgets for this category.
    pub category: Option<Category>,
}

/// A route handler for listing budgets, ordered by category name.
///
/// When neither a month nor a year is given, the listing defaults to the
/// current calendar month.
pub async fn list_budgets_endpoint(
    State(state): State<AppState>,
    Query(params): Query<BudgetListParams>,
) -> Result<Response, Error> {
    let month = params.month.map(validate_month).transpose()?;
    let year = params.year.map(validate_year).transpose()?;

    let (month, year) = match (month, year) {
        (None, None) => {
            let today = MonthOfYear::current(OffsetDateTime::now_utc().date());
            (Some(today.month), Some(today.year))
        }
        selector => selector,
    };

    let filter = BudgetFilter {
        month,
        year,
        category: params.category,
    };

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    let budgets = list_budgets(&filter, &connection)
        .inspect_err(|error| tracing::error!("could not list budgets: {error}"))?;

    Ok(Json(ApiResponse::data(budgets)).into_response())
}
