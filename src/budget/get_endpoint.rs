//! Defines the endpoint for fetching a single budget.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, budget::core::get_budget, database_id::BudgetId, response::ApiResponse,
};

/// A route handler for fetching a budget by its ID.
///
/// Responds with 404 if the ID does not refer to a budget.
pub async fn get_budget_endpoint(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    let budget = get_budget(budget_id, &connection)?;

    Ok(Json(ApiResponse::data(budget)).into_response())
}
