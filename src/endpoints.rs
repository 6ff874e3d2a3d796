//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to fetch, update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list and create budgets.
pub const BUDGETS: &str = "/api/budgets";
/// The route to fetch, update or delete a single budget.
pub const BUDGET: &str = "/api/budgets/{budget_id}";
/// The route for the per-category spending breakdown.
pub const CATEGORY_BREAKDOWN: &str = "/api/analytics/category-breakdown";
/// The route for the current-vs-previous month dashboard summary.
pub const DASHBOARD_SUMMARY: &str = "/api/analytics/dashboard-summary";
/// The route for the budget-vs-actual comparison.
pub const BUDGET_COMPARISON: &str = "/api/analytics/budget-comparison";
/// The route for the twelve-month series of a year.
pub const MONTHLY_EXPENSES: &str = "/api/analytics/monthly-expenses";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace. For
/// example, in '/api/budgets/{budget_id}', '{budget_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter. If no parameter is found in `endpoint_path`, the
/// function returns the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let param_start = match endpoint_path.find('{') {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know the routes will parse as URIs.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        for endpoint in [
            super::TRANSACTIONS,
            super::BUDGETS,
            super::CATEGORY_BREAKDOWN,
            super::DASHBOARD_SUMMARY,
            super::BUDGET_COMPARISON,
            super::MONTHLY_EXPENSES,
        ] {
            assert_endpoint_is_valid_uri(endpoint);
        }

        assert_endpoint_is_valid_uri(&format_endpoint(super::TRANSACTION, 1));
        assert_endpoint_is_valid_uri(&format_endpoint(super::BUDGET, 1));
    }

    #[test]
    fn format_endpoint_replaces_parameter() {
        let got = format_endpoint(super::TRANSACTION, 42);

        assert_eq!(got, "/api/transactions/42");
    }

    #[test]
    fn format_endpoint_without_parameter_returns_path() {
        let got = format_endpoint(super::TRANSACTIONS, 42);

        assert_eq!(got, super::TRANSACTIONS);
    }
}
