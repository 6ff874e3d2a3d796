//! Integer ID types for database rows.

/// The integer ID of a database row.
pub type DatabaseId = i64;

/// The ID of a transaction.
pub type TransactionId = DatabaseId;

/// The ID of a budget.
pub type BudgetId = DatabaseId;
