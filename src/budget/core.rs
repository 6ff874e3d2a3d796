//! Defines the core data model and database queries for budgets.

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::Category,
    database_id::BudgetId,
    period::validate_month,
};

/// The earliest year a budget may be created for.
pub const MIN_BUDGET_YEAR: i32 = 2020;

/// The latest year a budget may be created for.
pub const MAX_BUDGET_YEAR: i32 = 2050;

// ============================================================================
// MODELS
// ============================================================================

/// A spending limit for one category in one calendar month.
///
/// At most one budget exists per (category, month, year); the database
/// enforces this with a UNIQUE constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The ID of the budget.
    pub id: BudgetId,
    /// The category the limit applies to.
    pub category: Category,
    /// The budgeted amount. Zero is allowed and means an explicit limit of
    /// nothing, which is distinct from having no budget at all.
    pub amount: f64,
    /// The month the limit applies to, 1-12.
    pub month: u8,
    /// The year the limit applies to.
    pub year: i32,
}

/// The client-supplied fields of a budget, used by the create and update
/// endpoints.
///
/// A draft must pass [BudgetDraft::validated] before it is written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BudgetDraft {
    /// The category the limit applies to.
    pub category: Category,
    /// The budgeted amount.
    pub amount: f64,
    /// The month the limit applies to, 1-12.
    pub month: u8,
    /// The year the limit applies to.
    pub year: i32,
}

impl BudgetDraft {
    /// Check the draft against the write-time rules and round the amount to
    /// cents.
    ///
    /// # Errors
    /// This function will return:
    /// - [Error::InvalidBudgetAmount] if the amount is negative,
    /// - [Error::InvalidMonth] if the month is outside 1-12,
    /// - or [Error::InvalidYear] if the year is outside
    ///   [MIN_BUDGET_YEAR]-[MAX_BUDGET_YEAR].
    pub fn validated(mut self) -> Result<Self, Error> {
        if self.amount < 0.0 {
            return Err(Error::InvalidBudgetAmount(self.amount));
        }

        validate_month(self.month)?;

        if !(MIN_BUDGET_YEAR..=MAX_BUDGET_YEAR).contains(&self.year) {
            return Err(Error::InvalidYear(self.year));
        }

        self.amount = (self.amount * 100.0).round() / 100.0;

        Ok(self)
    }
}

/// The filters for the budget listing. All are optional and combine with AND
/// semantics.
#[derive(Debug, Default)]
pub struct BudgetFilter {
    /// Only include budgets for this month.
    pub month: Option<u8>,
    /// Only include budgets for this year.
    pub year: Option<i32>,
    /// Only include budgets for this category.
    pub category: Option<Category>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the budget table and its indexes.
///
/// # Errors
/// Returns an error if the DDL statements fail.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                month INTEGER NOT NULL,
                year INTEGER NOT NULL,
                UNIQUE (category, month, year)
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_budget_month_year ON budget (month, year)",
        (),
    )?;

    Ok(())
}

fn map_budget_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        category: row.get(1)?,
        amount: row.get(2)?,
        month: row.get(3)?,
        year: row.get(4)?,
    })
}

fn map_unique_violation(error: rusqlite::Error) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
            },
            _,
        ) => Error::DuplicateBudget,
        error => error.into(),
    }
}

/// Create a new budget in the database from a validated draft.
///
/// # Errors
/// This function will return:
/// - [Error::DuplicateBudget] if a budget already exists for the draft's
///   (category, month, year),
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_budget(draft: &BudgetDraft, connection: &Connection) -> Result<Budget, Error> {
    let budget = connection
        .prepare(
            "INSERT INTO budget (category, amount, month, year)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, category, amount, month, year",
        )?
        .query_row(
            (draft.category, draft.amount, draft.month, draft.year),
            map_budget_row,
        )
        .map_err(map_unique_violation)?;

    Ok(budget)
}

/// Retrieve a budget in the database by its `id`.
///
/// # Errors
/// This function will return:
/// - [Error::NotFound] if `id` does not refer to a valid budget,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_budget(id: BudgetId, connection: &Connection) -> Result<Budget, Error> {
    let budget = connection
        .prepare("SELECT id, category, amount, month, year FROM budget WHERE id = :id")?
        .query_row(&[(":id", &id)], map_budget_row)?;

    Ok(budget)
}

/// Overwrite the budget `id` with a validated draft.
///
/// # Errors
/// This function will return:
/// - [Error::NotFound] if `id` does not refer to a valid budget,
/// - [Error::DuplicateBudget] if the new (category, month, year) collides
///   with another budget,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_budget(
    id: BudgetId,
    draft: &BudgetDraft,
    connection: &Connection,
) -> Result<Budget, Error> {
    let budget = connection
        .prepare(
            "UPDATE budget SET category = ?1, amount = ?2, month = ?3, year = ?4
             WHERE id = ?5
             RETURNING id, category, amount, month, year",
        )?
        .query_row(
            (draft.category, draft.amount, draft.month, draft.year, id),
            map_budget_row,
        )
        .map_err(map_unique_violation)?;

    Ok(budget)
}

/// Delete the budget `id`.
///
/// # Errors
/// This function will return:
/// - [Error::NotFound] if `id` does not refer to a valid budget,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_budget(id: BudgetId, connection: &Connection) -> Result<(), Error> {
    let rows_deleted = connection.execute("DELETE FROM budget WHERE id = ?1", [id])?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// List budgets matching `filter`, ordered by category name.
///
/// The category-name ordering is part of the budget-comparison contract:
/// budgeted rows appear in this order.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn list_budgets(filter: &BudgetFilter, connection: &Connection) -> Result<Vec<Budget>, Error> {
    let mut where_clause_parts = vec![];
    let mut parameters: Vec<Value> = vec![];

    if let Some(month) = filter.month {
        parameters.push(Value::Integer(month as i64));
        where_clause_parts.push(format!("month = ?{}", parameters.len()));
    }

    if let Some(year) = filter.year {
        parameters.push(Value::Integer(year as i64));
        where_clause_parts.push(format!("year = ?{}", parameters.len()));
    }

    if let Some(category) = filter.category {
        parameters.push(Value::Text(category.as_str().to_owned()));
        where_clause_parts.push(format!("category = ?{}", parameters.len()));
    }

    let where_clause = if where_clause_parts.is_empty() {
        String::new()
    } else {
        String::from("WHERE ") + &where_clause_parts.join(" AND ")
    };

    connection
        .prepare(&format!(
            "SELECT id, category, amount, month, year FROM budget {where_clause} \
             ORDER BY category ASC"
        ))?
        .query_map(params_from_iter(parameters.iter()), map_budget_row)?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}
