//! The filtered, paginated transaction listing query.

use rusqlite::{Connection, params_from_iter, types::Value};
use time::Date;

use crate::{
    Error,
    category::{Category, TransactionType},
};

use super::core::{Transaction, map_transaction_row};

/// The filters and page selection for the transaction listing.
///
/// All filters are optional and combine with AND semantics; date bounds are
/// inclusive. Results are returned newest-created first.
#[derive(Debug, Default)]
pub struct TransactionListQuery {
    /// Only include transactions in this category.
    pub category: Option<Category>,
    /// Only include transactions of this type.
    pub transaction_type: Option<TransactionType>,
    /// Only include transactions on or after this date.
    pub start_date: Option<Date>,
    /// Only include transactions on or before this date.
    pub end_date: Option<Date>,
    /// Only include transactions whose description contains this text
    /// (case-insensitive).
    pub search: Option<String>,
    /// The 1-based page to return.
    pub page: u64,
    /// The number of transactions per page.
    pub limit: u64,
}

impl TransactionListQuery {
    fn where_clause(&self) -> (String, Vec<Value>) {
        let mut where_clause_parts = vec![];
        let mut parameters: Vec<Value> = vec![];

        if let Some(category) = self.category {
            parameters.push(Value::Text(category.as_str().to_owned()));
            where_clause_parts.push(format!("category = ?{}", parameters.len()));
        }

        if let Some(transaction_type) = self.transaction_type {
            parameters.push(Value::Text(transaction_type.as_str().to_owned()));
            where_clause_parts.push(format!("type = ?{}", parameters.len()));
        }

        if let Some(start_date) = self.start_date {
            parameters.push(Value::Text(start_date.to_string()));
            where_clause_parts.push(format!("date >= ?{}", parameters.len()));
        }

        if let Some(end_date) = self.end_date {
            parameters.push(Value::Text(end_date.to_string()));
            where_clause_parts.push(format!("date <= ?{}", parameters.len()));
        }

        if let Some(search) = &self.search {
            parameters.push(Value::Text(format!("%{search}%")));
            where_clause_parts.push(format!("description LIKE ?{}", parameters.len()));
        }

        let where_clause = if where_clause_parts.is_empty() {
            String::new()
        } else {
            String::from("WHERE ") + &where_clause_parts.join(" AND ")
        };

        (where_clause, parameters)
    }
}

/// Return the requested page of transactions plus the total count of
/// transactions matching the filters.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn query_transactions(
    query: &TransactionListQuery,
    connection: &Connection,
) -> Result<(Vec<Transaction>, u64), Error> {
    let (where_clause, parameters) = query.where_clause();

    let total: u64 = connection
        .prepare(&format!(
            "SELECT COUNT(id) FROM \"transaction\" {where_clause}"
        ))?
        .query_row(params_from_iter(parameters.iter()), |row| {
            row.get::<_, i64>(0)
        })? as u64;

    let offset = query.page.saturating_sub(1) * query.limit;
    let transactions = connection
        .prepare(&format!(
            "SELECT id, amount, date, description, category, type FROM \"transaction\" \
             {where_clause} ORDER BY id DESC LIMIT {} OFFSET {offset}",
            query.limit
        ))?
        .query_map(params_from_iter(parameters.iter()), map_transaction_row)?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect::<Result<Vec<Transaction>, Error>>()?;

    Ok((transactions, total))
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        category::{Category, TransactionType},
        db::initialize,
        transaction::core::{TransactionDraft, create_transaction},
    };

    use super::{TransactionListQuery, query_transactions};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn insert(
        conn: &Connection,
        amount: f64,
        date: time::Date,
        description: &str,
        category: Category,
        transaction_type: TransactionType,
    ) {
        create_transaction(
            &TransactionDraft {
                amount,
                date,
                description: description.to_owned(),
                category,
                transaction_type,
            },
            conn,
        )
        .unwrap();
    }

    fn seed(conn: &Connection) {
        insert(
            conn,
            100.0,
            date!(2024 - 03 - 05),
            "supermarket",
            Category::Food,
            TransactionType::Expense,
        );
        insert(
            conn,
            50.0,
            date!(2024 - 03 - 20),
            "petrol",
            Category::Transportation,
            TransactionType::Expense,
        );
        insert(
            conn,
            3000.0,
            date!(2024 - 04 - 01),
            "salary",
            Category::Other,
            TransactionType::Income,
        );
    }

    #[test]
    fn returns_newest_created_first() {
        let conn = get_test_connection();
        seed(&conn);

        let (transactions, total) = query_transactions(
            &TransactionListQuery {
                page: 1,
                limit: 10,
                ..Default::default()
            },
            &conn,
        )
        .unwrap();

        assert_eq!(total, 3);
        let descriptions: Vec<&str> = transactions
            .iter()
            .map(|transaction| transaction.description.as_str())
            .collect();
        assert_eq!(descriptions, ["salary", "petrol", "supermarket"]);
    }

    #[test]
    fn filters_by_category_and_type() {
        let conn = get_test_connection();
        seed(&conn);

        let (transactions, total) = query_transactions(
            &TransactionListQuery {
                category: Some(Category::Food),
                transaction_type: Some(TransactionType::Expense),
                page: 1,
                limit: 10,
                ..Default::default()
            },
            &conn,
        )
        .unwrap();

        assert_eq!(total, 1);
        assert_eq!(transactions[0].description, "supermarket");
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let conn = get_test_connection();
        seed(&conn);

        let (transactions, _) = query_transactions(
            &TransactionListQuery {
                start_date: Some(date!(2024 - 03 - 05)),
                end_date: Some(date!(2024 - 03 - 20)),
                page: 1,
                limit: 10,
                ..Default::default()
            },
            &conn,
        )
        .unwrap();

        assert_eq!(transactions.len(), 2);
    }

    #[test]
    fn search_matches_description_case_insensitively() {
        let conn = get_test_connection();
        seed(&conn);

        let (transactions, total) = query_transactions(
            &TransactionListQuery {
                search: Some("SUPER".to_owned()),
                page: 1,
                limit: 10,
                ..Default::default()
            },
            &conn,
        )
        .unwrap();

        assert_eq!(total, 1);
        assert_eq!(transactions[0].description, "supermarket");
    }

    #[test]
    fn paginates_and_reports_the_unpaged_total() {
        let conn = get_test_connection();
        seed(&conn);

        let (page_two, total) = query_transactions(
            &TransactionListQuery {
                page: 2,
                limit: 2,
                ..Default::default()
            },
            &conn,
        )
        .unwrap();

        assert_eq!(total, 3, "want the unpaged count, got {total}");
        assert_eq!(page_two.len(), 1);
        assert_eq!(page_two[0].description, "supermarket");
    }
}
