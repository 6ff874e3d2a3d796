//! Application router configuration.

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    AppState, Error,
    analytics::{
        budget_comparison_endpoint, category_breakdown_endpoint, dashboard_summary_endpoint,
        monthly_expenses_endpoint,
    },
    budget::{
        create_budget_endpoint, delete_budget_endpoint, edit_budget_endpoint, get_budget_endpoint,
        list_budgets_endpoint,
    },
    endpoints,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::BUDGETS,
            get(list_budgets_endpoint).post(create_budget_endpoint),
        )
        .route(
            endpoints::BUDGET,
            get(get_budget_endpoint)
                .put(edit_budget_endpoint)
                .delete(delete_budget_endpoint),
        )
        .route(
            endpoints::CATEGORY_BREAKDOWN,
            get(category_breakdown_endpoint),
        )
        .route(endpoints::DASHBOARD_SUMMARY, get(dashboard_summary_endpoint))
        .route(endpoints::BUDGET_COMPARISON, get(budget_comparison_endpoint))
        .route(endpoints::MONTHLY_EXPENSES, get(monthly_expenses_endpoint))
        .fallback(get_unknown_route)
        .with_state(state)
}

/// Unknown routes get the same JSON envelope as a missing resource.
async fn get_unknown_route() -> Response {
    Error::NotFound.into_response()
}
