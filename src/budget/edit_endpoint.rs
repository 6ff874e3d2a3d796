//! Defines the endpoint for updating an existing budget.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    budget::core::{BudgetDraft, update_budget},
    database_id::BudgetId,
    response::ApiResponse,
};

/// A route handler for replacing the fields of a budget.
///
/// The draft is revalidated in full, exactly as on creation. Responds with
/// 404 if the ID does not refer to a budget, or 409 if the new (category,
/// month, year) collides with another budget.
pub async fn edit_budget_endpoint(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
    Json(draft): Json<BudgetDraft>,
) -> Result<Response, Error> {
    let draft = draft.validated()?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    let budget = update_budget(budget_id, &draft, &connection)
        .inspect_err(|error| tracing::error!("could not update budget: {error}"))?;

    Ok(Json(ApiResponse::with_message(
        budget,
        "Budget updated successfully",
    ))
    .into_response())
}
