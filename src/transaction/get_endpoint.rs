//! Defines the endpoint for fetching a single transaction.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, database_id::TransactionId, response::ApiResponse,
    transaction::core::get_transaction,
};

/// A route handler for fetching a transaction by its ID.
///
/// Responds with 404 if the ID does not refer to a transaction.
pub async fn get_transaction_endpoint(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    let transaction = get_transaction(transaction_id, &connection)?;

    Ok(Json(ApiResponse::data(transaction)).into_response())
}
