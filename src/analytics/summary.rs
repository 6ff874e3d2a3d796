//! The current-vs-previous month dashboard summary view.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    analytics::{
        percent::Percent,
        query::{TypeTotal, recent_transactions, sum_by_type},
    },
    category::TransactionType,
    period::{MonthOfYear, validate_month, validate_year},
    response::ApiResponse,
    transaction::Transaction,
};

/// How many recent transactions the dashboard shows.
const RECENT_TRANSACTION_COUNT: u32 = 5;

/// The query parameters accepted by the dashboard summary.
///
/// Each missing parameter defaults to the current month or year
/// independently.
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    /// The month to summarize.
    pub month: Option<u8>,
    /// The year to summarize.
    pub year: Option<i32>,
}

/// The income, expense and balance totals of one month.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    /// The sum of income transactions.
    pub income: f64,
    /// The sum of expense transactions.
    pub expenses: f64,
    /// Income minus expenses; may be negative.
    pub balance: f64,
    /// How many transactions of either type the month had.
    pub transaction_count: i64,
}

/// The month-over-month change percentages.
#[derive(Debug, Serialize)]
pub struct SummaryChanges {
    /// The change in income relative to the previous month.
    pub income: Percent,
    /// The change in expenses relative to the previous month.
    pub expenses: Percent,
}

/// The dashboard summary payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// The totals of the requested month.
    pub current_month: PeriodSummary,
    /// The totals of the month before it.
    pub previous_month: PeriodSummary,
    /// Month-over-month change percentages.
    pub changes: SummaryChanges,
    /// The most recently dated transactions across all periods.
    pub recent_transactions: Vec<Transaction>,
}

/// Fold per-type totals into a month's summary.
///
/// Types with no transactions default to zero, so an empty month folds to an
/// all-zero summary rather than an error.
fn period_summary(totals: &[TypeTotal]) -> PeriodSummary {
    let mut summary = PeriodSummary::default();

    for row in totals {
        match row.transaction_type {
            TransactionType::Income => summary.income = row.total,
            TransactionType::Expense => summary.expenses = row.total,
        }
        summary.transaction_count += row.count;
    }

    summary.balance = summary.income - summary.expenses;
    summary
}

/// Combine the two months' totals and the recent transactions into the
/// dashboard payload.
fn compose_summary(
    current_totals: &[TypeTotal],
    previous_totals: &[TypeTotal],
    recent: Vec<Transaction>,
) -> DashboardSummary {
    let current_month = period_summary(current_totals);
    let previous_month = period_summary(previous_totals);

    let changes = SummaryChanges {
        income: Percent::change(current_month.income, previous_month.income),
        expenses: Percent::change(current_month.expenses, previous_month.expenses),
    };

    DashboardSummary {
        current_month,
        previous_month,
        changes,
        recent_transactions: recent,
    }
}

/// A route handler for the dashboard summary.
pub async fn dashboard_summary_endpoint(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<Response, Error> {
    let today = OffsetDateTime::now_utc().date();
    let current = MonthOfYear {
        month: params
            .month
            .map(validate_month)
            .transpose()?
            .unwrap_or(MonthOfYear::current(today).month),
        year: params
            .year
            .map(validate_year)
            .transpose()?
            .unwrap_or(today.year()),
    };
    let previous = current.previous();

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    let current_totals = sum_by_type(current.bounds(), &connection)
        .inspect_err(|error| tracing::error!("could not aggregate the current month: {error}"))?;
    let previous_totals = sum_by_type(previous.bounds(), &connection)
        .inspect_err(|error| tracing::error!("could not aggregate the previous month: {error}"))?;
    let recent = recent_transactions(RECENT_TRANSACTION_COUNT, &connection)
        .inspect_err(|error| tracing::error!("could not fetch recent transactions: {error}"))?;
    drop(connection);

    let summary = compose_summary(&current_totals, &previous_totals, recent);

    Ok(Json(ApiResponse::data(summary)).into_response())
}
