//! The budget-vs-actual comparison view.
//!
//! Merges the month's budgets with the aggregated actual spend per category.
//! The two sets are queried independently, so either side may be missing a
//! category the other has: a budget with no spend compares against zero, and
//! spend with no budget is surfaced as a `no_budget` row.

use std::collections::{HashMap, HashSet};

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    analytics::{
        percent::Percent,
        query::{CategorySpend, sum_by_category},
    },
    budget::{Budget, BudgetFilter, list_budgets},
    category::{Category, TransactionType},
    period::{MonthOfYear, validate_month, validate_year},
    response::ApiResponse,
};

/// The query parameters accepted by the budget comparison.
///
/// Each missing parameter defaults to the current month or year
/// independently.
#[derive(Debug, Deserialize)]
pub struct ComparisonParams {
    /// The month to compare.
    pub month: Option<u8>,
    /// The year to compare.
    pub year: Option<i32>,
}

/// How a category's actual spend relates to its budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Spend is within the budgeted amount.
    Under,
    /// Spend exceeds the budgeted amount.
    Over,
    /// The category has spend but no budget record for the period.
    NoBudget,
}

/// One category's budget-vs-actual comparison.
#[derive(Debug, Serialize)]
pub struct CategoryComparison {
    /// The category being compared.
    pub category: Category,
    /// The budgeted amount, zero when no budget record exists.
    pub budgeted: f64,
    /// The actual spend in the period.
    pub actual: f64,
    /// Budgeted minus actual; negative when over budget.
    pub remaining: f64,
    /// How much of the budget the spend consumed.
    pub percentage: Percent,
    /// Whether the category is under, over or unbudgeted.
    pub status: BudgetStatus,
}

/// Merge a month's budgets with its actual spend per category.
///
/// Budgeted categories come first, in the category-name order the budget
/// query returns; categories with spend but no budget follow in the
/// aggregator's descending-total order. A budget record with a zero amount
/// still counts as budgeted: existence of the record, not its amount, decides
/// which branch a category takes.
fn reconcile(budgets: &[Budget], actual_spend: &[CategorySpend]) -> Vec<CategoryComparison> {
    let actual_by_category: HashMap<Category, f64> = actual_spend
        .iter()
        .map(|row| (row.category, row.total))
        .collect();
    let budgeted_categories: HashSet<Category> =
        budgets.iter().map(|budget| budget.category).collect();

    let mut comparisons: Vec<CategoryComparison> = budgets
        .iter()
        .map(|budget| {
            let actual = actual_by_category
                .get(&budget.category)
                .copied()
                .unwrap_or(0.0);
            let remaining = budget.amount - actual;

            CategoryComparison {
                category: budget.category,
                budgeted: budget.amount,
                actual,
                remaining,
                percentage: Percent::budget_usage(actual, budget.amount),
                status: if remaining >= 0.0 {
                    BudgetStatus::Under
                } else {
                    BudgetStatus::Over
                },
            }
        })
        .collect();

    for row in actual_spend {
        if budgeted_categories.contains(&row.category) {
            continue;
        }

        comparisons.push(CategoryComparison {
            category: row.category,
            budgeted: 0.0,
            actual: row.total,
            remaining: -row.total,
            percentage: Percent::Zero,
            status: BudgetStatus::NoBudget,
        });
    }

    comparisons
}

/// A route handler for the budget-vs-actual comparison of a month.
pub async fn budget_comparison_endpoint(
    State(state): State<AppState>,
    Query(params): Query<ComparisonParams>,
) -> Result<Response, Error> {
    let today = OffsetDateTime::now_utc().date();
    let period = MonthOfYear {
        month: params
            .month
            .map(validate_month)
            .transpose()?
            .unwrap_or(MonthOfYear::current(today).month),
        year: params
            .year
            .map(validate_year)
            .transpose()?
            .unwrap_or(today.year()),
    };

    let filter = BudgetFilter {
        month: Some(period.month),
        year: Some(period.year),
        category: None,
    };

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    let budgets = list_budgets(&filter, &connection)
        .inspect_err(|error| tracing::error!("could not list budgets: {error}"))?;
    let actual_spend = sum_by_category(period.bounds(), Some(TransactionType::Expense), &connection)
        .inspect_err(|error| tracing::error!("could not aggregate actual spend: {error}"))?;
    drop(connection);

    let comparisons = reconcile(&budgets, &actual_spend);

    Ok(Json(ApiResponse::data(comparisons)).into_response())
}
