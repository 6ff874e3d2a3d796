//! Defines the endpoint for creating a new budget.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    budget::core::{BudgetDraft, create_budget},
    response::ApiResponse,
};

/// A route handler for creating a new budget.
///
/// Responds with 201 and the created record, 400 if the draft fails
/// validation, or 409 if a budget already exists for the (category, month,
/// year).
pub async fn create_budget_endpoint(
    State(state): State<AppState>,
    Json(draft): Json<BudgetDraft>,
) -> Result<Response, Error> {
    let draft = draft.validated()?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    let budget = create_budget(&draft, &connection)
        .inspect_err(|error| tracing::error!("could not create budget: {error}"))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            budget,
            "Budget created successfully",
        )),
    )
        .into_response())
}
