//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::{Category, TransactionType},
    database_id::TransactionId,
};

/// The maximum length of a transaction description in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category of spending or earning.
    pub category: Category,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// The client-supplied fields of a transaction, used by the create and update
/// endpoints.
///
/// A draft must pass [TransactionDraft::validated] before it is written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionDraft {
    /// The amount of money spent or earned.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category of spending or earning.
    pub category: Category,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl TransactionDraft {
    /// Check the draft against the write-time rules and normalize it:
    /// the amount is rounded to cents and the description trimmed.
    ///
    /// # Errors
    /// This function will return:
    /// - [Error::InvalidAmount] if the amount is zero or negative,
    /// - [Error::FutureDate] if the date is later than `today`,
    /// - [Error::EmptyDescription] if the trimmed description is empty,
    /// - or [Error::DescriptionTooLong] if it exceeds
    ///   [MAX_DESCRIPTION_LENGTH] characters.
    pub fn validated(mut self, today: Date) -> Result<Self, Error> {
        if self.amount <= 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        if self.date > today {
            return Err(Error::FutureDate(self.date));
        }

        self.description = self.description.trim().to_owned();

        if self.description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        let length = self.description.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(Error::DescriptionTooLong(length));
        }

        self.amount = (self.amount * 100.0).round() / 100.0;

        Ok(self)
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table and its indexes.
///
/// # Errors
/// Returns an error if the DDL statements fail.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                type TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\" (date);
         CREATE INDEX IF NOT EXISTS idx_transaction_date_type ON \"transaction\" (date, type);
         CREATE INDEX IF NOT EXISTS idx_transaction_category_type ON \"transaction\" (category, type);",
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
///
/// The columns must be in the order id, amount, date, description, category,
/// type.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        transaction_type: row.get(5)?,
    })
}

/// Create a new transaction in the database from a validated draft.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn create_transaction(
    draft: &TransactionDraft,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, description, category, type)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, date, description, category, type",
        )?
        .query_row(
            (
                draft.amount,
                draft.date,
                &draft.description,
                draft.category,
                draft.transaction_type,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction in the database by its `id`.
///
/// # Errors
/// This function will return:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, date, description, category, type
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Overwrite the transaction `id` with a validated draft.
///
/// # Errors
/// This function will return:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    draft: &TransactionDraft,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "UPDATE \"transaction\"
             SET amount = ?1, date = ?2, description = ?3, category = ?4, type = ?5
             WHERE id = ?6
             RETURNING id, amount, date, description, category, type",
        )?
        .query_row(
            (
                draft.amount,
                draft.date,
                &draft.description,
                draft.category,
                draft.transaction_type,
                id,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Delete the transaction `id`.
///
/// # Errors
/// This function will return:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_deleted = connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}
