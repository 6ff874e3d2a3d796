//! Defines the endpoint for deleting a transaction.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, database_id::TransactionId, response::ApiResponse,
    transaction::core::delete_transaction,
};

/// A route handler for deleting a transaction by its ID.
///
/// Responds with 404 if the ID does not refer to a transaction.
pub async fn delete_transaction_endpoint(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    delete_transaction(transaction_id, &connection)
        .inspect_err(|error| tracing::error!("could not delete transaction: {error}"))?;

    Ok(Json(ApiResponse::message_only("Transaction deleted successfully")).into_response())
}
