//! Defines the endpoint for listing transactions with filters and paging.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    category::{Category, TransactionType},
    pagination::Pagination,
    response::ApiResponse,
    transaction::{
        core::Transaction,
        query::{TransactionListQuery, query_transactions},
    },
};

/// The query parameters accepted by the transaction listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListParams {
    /// The 1-based page to return. Zero falls back to the default page.
    pub page: Option<u64>,
    /// The number of transactions per page. Zero falls back to the default.
    pub limit: Option<u64>,
    /// Only include transactions in this category.
    pub category: Option<Category>,
    /// Only include transactions of this type.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// Only include transactions on or after this date.
    pub start_date: Option<Date>,
    /// Only include transactions on or before this date.
    pub end_date: Option<Date>,
    /// Only include transactions whose description contains this text.
    pub search: Option<String>,
}

/// The payload of the transaction listing.
#[derive(Debug, Serialize)]
pub struct TransactionListData {
    /// The requested page of transactions, newest-created first.
    pub transactions: Vec<Transaction>,
    /// Page metadata for the filtered set.
    pub pagination: Pagination,
}

/// A route handler for listing transactions.
pub async fn list_transactions_endpoint(
    State(state): State<AppState>,
    Query(params): Query<TransactionListParams>,
) -> Result<Response, Error> {
    let page = params
        .page
        .filter(|&page| page > 0)
        .unwrap_or(state.pagination_config.default_page);
    let limit = params
        .limit
        .filter(|&limit| limit > 0)
        .unwrap_or(state.pagination_config.default_page_size);

    let query = TransactionListQuery {
        category: params.category,
        transaction_type: params.transaction_type,
        start_date: params.start_date,
        end_date: params.end_date,
        search: params.search,
        page,
        limit,
    };

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    let (transactions, total) = query_transactions(&query, &connection)
        .inspect_err(|error| tracing::error!("could not query transactions: {error}"))?;

    Ok(Json(ApiResponse::data(TransactionListData {
        transactions,
        pagination: Pagination::new(page, limit, total),
    }))
    .into_response())
}
