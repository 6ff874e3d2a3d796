//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    response::ApiResponse,
    transaction::core::{TransactionDraft, create_transaction},
};

/// A route handler for creating a new transaction.
///
/// Responds with 201 and the created record, or 400 if the draft fails
/// validation.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Json(draft): Json<TransactionDraft>,
) -> Result<Response, Error> {
    let draft = draft.validated(OffsetDateTime::now_utc().date())?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    let transaction = create_transaction(&draft, &connection)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            transaction,
            "Transaction created successfully",
        )),
    )
        .into_response())
}
