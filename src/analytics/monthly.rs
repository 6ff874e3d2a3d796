//! The twelve-month series view.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    analytics::query::{MonthTotal, sum_by_month},
    category::TransactionType,
    period::validate_year,
    response::ApiResponse,
};

/// The fixed month labels clients render on the chart axis. These literal
/// strings are part of the output contract.
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The query parameters accepted by the monthly series.
#[derive(Debug, Deserialize)]
pub struct MonthlySeriesParams {
    /// The year to chart, defaulting to the current year.
    pub year: Option<i32>,
    /// The transaction type to chart, defaulting to expenses.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
}

/// One month's slot in the series.
#[derive(Debug, PartialEq, Serialize)]
pub struct MonthlySeriesEntry {
    /// The month's three-letter label, "Jan" through "Dec".
    pub month: &'static str,
    /// The sum of the matching transaction amounts, zero when the month had
    /// none.
    pub amount: f64,
    /// How many transactions matched, zero when the month had none.
    pub count: i64,
}

/// Spread the aggregated rows over exactly twelve ordered slots, January
/// first, filling months with no transactions with zeros.
fn build_monthly_series(rows: &[MonthTotal]) -> Vec<MonthlySeriesEntry> {
    let mut slots = [(0.0_f64, 0_i64); 12];

    for row in rows {
        let Some(slot) = (row.month as usize)
            .checked_sub(1)
            .and_then(|index| slots.get_mut(index))
        else {
            continue;
        };
        *slot = (row.total, row.count);
    }

    MONTH_LABELS
        .iter()
        .zip(slots)
        .map(|(&month, (amount, count))| MonthlySeriesEntry {
            month,
            amount,
            count,
        })
        .collect()
}

/// A route handler for the twelve-month series of a year.
pub async fn monthly_expenses_endpoint(
    State(state): State<AppState>,
    Query(params): Query<MonthlySeriesParams>,
) -> Result<Response, Error> {
    let year = params
        .year
        .map(validate_year)
        .transpose()?
        .unwrap_or_else(|| OffsetDateTime::now_utc().date().year());
    let transaction_type = params.transaction_type.unwrap_or(TransactionType::Expense);

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    let rows = sum_by_month(year, transaction_type, &connection)
        .inspect_err(|error| tracing::error!("could not aggregate months: {error}"))?;
    drop(connection);

    Ok(Json(ApiResponse::data(build_monthly_series(&rows))).into_response())
}
