//! Defines the endpoint for updating an existing transaction.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    response::ApiResponse,
    transaction::core::{TransactionDraft, update_transaction},
};

/// A route handler for replacing the fields of a transaction.
///
/// The draft is revalidated in full, exactly as on creation. Responds with
/// 404 if the ID does not refer to a transaction.
pub async fn edit_transaction_endpoint(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
    Json(draft): Json<TransactionDraft>,
) -> Result<Response, Error> {
    let draft = draft.validated(OffsetDateTime::now_utc().date())?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    let transaction = update_transaction(transaction_id, &draft, &connection)
        .inspect_err(|error| tracing::error!("could not update transaction: {error}"))?;

    Ok(Json(ApiResponse::with_message(
        transaction,
        "Transaction updated successfully",
    ))
    .into_response())
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
    async fn updates_a_transaction() {
        let server = TestServer::try_new(build_router(test_state())).unwrap();
        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "amount": 42.5,
                "date": "2024-03-05",
                "description": "weekly groceries",
                "category": "food",
                "type": "expense",
            }))
            .await
            .assert_status_success();

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 1))
            .json(&json!({
                "amount": 45.0,
                "date": "2024-03-06",
                "description": "weekly groceries and snacks",
                "category": "food",
                "type": "expense",
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], json!("Transaction updated successfully"));
        assert_eq!(body["data"]["amount"], json!(45.0));
        assert_eq!(body["data"]["date"], json!("2024-03-06"));
    }

    #[tokio::test]
    async fn updating_a_missing_transaction_is_not_found() {
        let server = TestServer::try_new(build_router(test_state())).unwrap();

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 999))
            .json(&json!({
                "amount": 45.0,
                "date": "2024-03-06",
                "description": "ghost",
                "category": "food",
                "type": "expense",
            }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_an_invalid_draft_before_touching_storage() {
        let server = TestServer::try_new(build_router(test_state())).unwrap();

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 999))
            .json(&json!({
                "amount": -1.0,
                "date": "2024-03-06",
                "description": "ghost",
                "category": "food",
                "type": "expense",
            }))
            .await;

        // Validation runs first, so the bad amount wins over the bad ID.
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
