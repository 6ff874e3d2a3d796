//! Defines the endpoint for deleting a budget.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, budget::core::delete_budget, database_id::BudgetId, response::ApiResponse,
};

/// A route handler for deleting a budget by its ID.
///
/// Responds with 404 if the ID does not refer to a budget.
pub async fn delete_budget_endpoint(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    delete_budget(budget_id, &connection)
        .inspect_err(|error| tracing::error!("could not delete budget: {error}"))?;

    Ok(Json(ApiResponse::message_only("Budget deleted successfully")).into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        build_router,
        endpoints::{self, format_endpoint},
        test_utils::test_state,
    };

    #[tokio::test]
    async fn deletes_a_budget() {
        let server = TestServer::try_new(build_router(test_state())).unwrap();
        server
            .post(endpoints::BUDGETS)
            .json(&json!({
                "category": "food",
                "amount": 300.0,
                "month": 3,
                "year": 2024,
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.delete(&format_endpoint(endpoints::BUDGET, 1)).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], json!("Budget deleted successfully"));

        server
            .get(&format_endpoint(endpoints::BUDGET, 1))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleting_a_missing_budget_is_not_found() {
        let server = TestServer::try_new(build_router(test_state())).unwrap();

        let response = server
            .delete(&format_endpoint(endpoints::BUDGET, 999))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
