//! The per-category spending breakdown view.

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
        query::{CategorySpend, sum_by_category},
    },
    category::{Category, TransactionType},
    period::{resolve_range, validate_month, validate_year},
};

/// The query parameters accepted by the category breakdown.
#[derive(Debug, Deserialize)]
pub struct BreakdownParams {
    /// The month to break down. Requires `year` to take effect.
    pub month: Option<u8>,
    /// The year to break down. On its own selects the whole year.
    pub year: Option<i32>,
    /// The transaction type to break down, defaulting to expenses.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
}

/// One category's share of the period.
#[derive(Debug, Serialize)]
pub struct CategorySlice {
    /// The category the transactions belong to.
    pub category: Category,
    /// The sum of the matching transaction amounts.
    pub amount: f64,
    /// How many transactions matched.
    pub count: i64,
    /// This category's share of the period total.
    pub percentage: Percent,
}

/// The breakdown payload: the envelope carries the period total alongside the
/// per-category slices.
#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    /// Always `true` for this type.
    pub success: bool,
    /// The per-category slices, largest total first.
    pub data: Vec<CategorySlice>,
    /// The sum across all categories in the period.
    pub total: f64,
}

/// Attach the period total and per-category shares to the aggregated rows.
///
/// The rows keep the aggregator's ordering: total descending, ties broken by
/// category name.
fn breakdown(rows: Vec<CategorySpend>) -> (Vec<CategorySlice>, f64) {
    let total: f64 = rows.iter().map(|row| row.total).sum();

    let slices = rows
        .into_iter()
        .map(|row| CategorySlice {
            category: row.category,
            amount: row.total,
            count: row.count,
            percentage: Percent::share_of_total(row.total, total),
        })
        .collect();

    (slices, total)
}

/// A route handler for the per-category breakdown of a period.
///
/// Defaults to the current month's expenses when no period is given.
pub async fn category_breakdown_endpoint(
    State(state): State<AppState>,
    Query(params): Query<BreakdownParams>,
) -> Result<Response, Error> {
    let month = params.month.map(validate_month).transpose()?;
    let year = params.year.map(validate_year).transpose()?;
    let transaction_type = params.transaction_type.unwrap_or(TransactionType::Expense);

    let range = resolve_range(month, year, OffsetDateTime::now_utc().date());

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    let rows = sum_by_category(range, Some(transaction_type), &connection)
        .inspect_err(|error| tracing::error!("could not aggregate categories: {error}"))?;
    drop(connection);

    let (data, total) = breakdown(rows);

    Ok(Json(BreakdownResponse {
        success: true,
        data,
        total,
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        analytics::{percent::Percent, query::CategorySpend},
        build_router,
        category::Category,
        endpoints,
        test_utils::test_state,
    };

    use super::breakdown;

    #[test]
    fn single_category_takes_the_whole_total() {
        let rows = vec![CategorySpend {
            category: Category::Food,
            total: 150.0,
            count: 2,
        }];

        let (slices, total) = breakdown(rows);

        assert_eq!(total, 150.0);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].amount, 150.0);
        assert_eq!(slices[0].count, 2);
        assert_eq!(slices[0].percentage, Percent::Formatted(100.0));
    }

    #[test]
    fn shares_are_relative_to_the_period_total() {
        let rows = vec![
            CategorySpend {
                category: Category::Housing,
                total: 150.0,
                count: 1,
            },
            CategorySpend {
                category: Category::Food,
                total: 50.0,
                count: 3,
            },
        ];

        let (slices, total) = breakdown(rows);

        assert_eq!(total, 200.0);
        assert_eq!(slices[0].percentage, Percent::Formatted(75.0));
        assert_eq!(slices[1].percentage, Percent::Formatted(25.0));
    }

    #[test]
    fn empty_period_yields_an_empty_breakdown() {
        let (slices, total) = breakdown(vec![]);

        assert!(slices.is_empty());
        assert_eq!(total, 0.0);
    }

    #[tokio::test]
    async fn breakdown_endpoint_shapes_the_payload() {
        let server = TestServer::try_new(build_router(test_state())).unwrap();
        for (amount, date, category, transaction_type) in [
            (100.0, "2024-03-05", "food", "expense"),
            (50.0, "2024-03-20", "food", "expense"),
            (30.0, "2024-03-10", "other", "income"),
        ] {
            server
                .post(endpoints::TRANSACTIONS)
                .json(&json!({
                    "amount": amount,
                    "date": date,
                    "description": "seed",
                    "category": category,
                    "type": transaction_type,
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server
            .get(endpoints::CATEGORY_BREAKDOWN)
            .add_query_param("month", 3)
            .add_query_param("year", 2024)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "success": true,
                "data": [{
                    "category": "food",
                    "amount": 150.0,
                    "count": 2,
                    "percentage": "100.0",
                }],
                "total": 150.0,
            })
        );
    }

    #[tokio::test]
    async fn breakdown_endpoint_rejects_a_bad_month() {
        let server = TestServer::try_new(build_router(test_state())).unwrap();

        let response = server
            .get(endpoints::CATEGORY_BREAKDOWN)
            .add_query_param("month", 13)
            .add_query_param("year", 2024)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
