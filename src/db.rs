//! Database schema initialization.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, budget::create_budget_table, transaction::create_transaction_table,
};

/// Create the application tables and indexes if they do not already exist.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the DDL statements fail.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let sql_transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&sql_transaction)?;
    create_budget_table(&sql_transaction)?;

    sql_transaction.commit()?;

    Ok(())
}
