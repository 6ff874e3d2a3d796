//! The grouped storage reads behind the analytics views.
//!
//! Grouping happens in SQL so the views receive `{key, total, count}` rows,
//! the same shape the rest of the analytics layer is written against. All
//! reads are side-effect free; rerunning any of them against an unchanged
//! database yields identical rows.

use rusqlite::{Connection, params, params_from_iter, types::Value};

use crate::{
    Error,
    category::{Category, TransactionType},
    period::DateRange,
    transaction::{Transaction, map_transaction_row},
};

/// A category's total and record count within a period.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    /// The category the transactions belong to.
    pub category: Category,
    /// The sum of the matching transaction amounts.
    pub total: f64,
    /// How many transactions matched.
    pub count: i64,
}

/// A transaction type's total and record count within a period.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeTotal {
    /// The transaction type the rows were grouped under.
    pub transaction_type: TransactionType,
    /// The sum of the matching transaction amounts.
    pub total: f64,
    /// How many transactions matched.
    pub count: i64,
}

/// A calendar month's total and record count within a year.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    /// The month number, 1 (January) to 12 (December).
    pub month: u8,
    /// The sum of the matching transaction amounts.
    pub total: f64,
    /// How many transactions matched.
    pub count: i64,
}

/// Sum transactions per category within `range`, optionally restricted to
/// one transaction type.
///
/// Rows are ordered by total descending; ties are broken by category name
/// ascending so the ordering is deterministic.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn sum_by_category(
    range: DateRange,
    transaction_type: Option<TransactionType>,
    connection: &Connection,
) -> Result<Vec<CategorySpend>, Error> {
    let mut parameters = vec![
        Value::Text(range.start.to_string()),
        Value::Text(range.end.to_string()),
    ];

    let type_clause = match transaction_type {
        Some(transaction_type) => {
            parameters.push(Value::Text(transaction_type.as_str().to_owned()));
            format!("AND type = ?{}", parameters.len())
        }
        None => String::new(),
    };

    connection
        .prepare(&format!(
            "SELECT category, SUM(amount) AS total, COUNT(id) AS count
             FROM \"transaction\"
             WHERE date BETWEEN ?1 AND ?2 {type_clause}
             GROUP BY category
             ORDER BY total DESC, category ASC"
        ))?
        .query_map(params_from_iter(parameters.iter()), |row| {
            Ok(CategorySpend {
                category: row.get(0)?,
                total: row.get(1)?,
                count: row.get(2)?,
            })
        })?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}

/// Sum transactions per type (income and expense) within `range`.
///
/// Types with no transactions in the range produce no row; the composers
/// treat absence as zero.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn sum_by_type(range: DateRange, connection: &Connection) -> Result<Vec<TypeTotal>, Error> {
    connection
        .prepare(
            "SELECT type, SUM(amount) AS total, COUNT(id) AS count
             FROM \"transaction\"
             WHERE date BETWEEN ?1 AND ?2
             GROUP BY type",
        )?
        .query_map(
            params![range.start.to_string(), range.end.to_string()],
            |row| {
                Ok(TypeTotal {
                    transaction_type: row.get(0)?,
                    total: row.get(1)?,
                    count: row.get(2)?,
                })
            },
        )?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}

/// Sum transactions of `transaction_type` per calendar month of `year`.
///
/// Months with no transactions produce no row; the series builder fills the
/// gaps with zeros.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn sum_by_month(
    year: i32,
    transaction_type: TransactionType,
    connection: &Connection,
) -> Result<Vec<MonthTotal>, Error> {
    connection
        .prepare(
            "SELECT CAST(strftime('%m', date) AS INTEGER) AS month,
                    SUM(amount) AS total,
                    COUNT(id) AS count
             FROM \"transaction\"
             WHERE type = ?1 AND date BETWEEN ?2 AND ?3
             GROUP BY month
             ORDER BY month ASC",
        )?
        .query_map(
            params![
                transaction_type,
                format!("{year:04}-01-01"),
                format!("{year:04}-12-31")
            ],
            |row| {
                Ok(MonthTotal {
                    month: row.get(0)?,
                    total: row.get(1)?,
                    count: row.get(2)?,
                })
            },
        )?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}

/// The most recently dated `limit` transactions.
///
/// Ordered by date descending; same-day transactions are ordered most
/// recently created first (id descending).
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn recent_transactions(
    limit: u32,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, description, category, type
             FROM \"transaction\"
             ORDER BY date DESC, id DESC
             LIMIT ?1",
        )?
        .query_map([limit], map_transaction_row)?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        category::{Category, TransactionType},
        db::initialize,
        period::DateRange,
        transaction::{TransactionDraft, create_transaction},
    };

    use super::{
        CategorySpend, MonthTotal, recent_transactions, sum_by_category, sum_by_month, sum_by_type,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn insert(
        conn: &Connection,
        amount: f64,
        date: time::Date,
        category: Category,
        transaction_type: TransactionType,
    ) {
        create_transaction(
            &TransactionDraft {
                amount,
                date,
                description: format!("{category} {transaction_type}"),
                category,
                transaction_type,
            },
            conn,
        )
        .unwrap();
    }

    fn march_2024() -> DateRange {
        DateRange {
            start: date!(2024 - 03 - 01),
            end: date!(2024 - 03 - 31),
        }
    }

    #[test]
    fn sums_by_category_within_the_range() {
        let conn = get_test_connection();
        insert(
            &conn,
            100.0,
            date!(2024 - 03 - 05),
            Category::Food,
            TransactionType::Expense,
        );
        insert(
            &conn,
            50.0,
            date!(2024 - 03 - 20),
            Category::Food,
            TransactionType::Expense,
        );
        insert(
            &conn,
            30.0,
            date!(2024 - 03 - 10),
            Category::Other,
            TransactionType::Income,
        );
        // Outside the range, must be excluded.
        insert(
            &conn,
            999.0,
            date!(2024 - 04 - 01),
            Category::Food,
            TransactionType::Expense,
        );

        let got = sum_by_category(march_2024(), Some(TransactionType::Expense), &conn).unwrap();

        assert_eq!(
            got,
            vec![CategorySpend {
                category: Category::Food,
                total: 150.0,
                count: 2,
            }]
        );
    }

    #[test]
    fn sums_by_category_without_a_type_filter() {
        let conn = get_test_connection();
        insert(
            &conn,
            100.0,
            date!(2024 - 03 - 05),
            Category::Other,
            TransactionType::Expense,
        );
        insert(
            &conn,
            30.0,
            date!(2024 - 03 - 10),
            Category::Other,
            TransactionType::Income,
        );

        let got = sum_by_category(march_2024(), None, &conn).unwrap();

        assert_eq!(
            got,
            vec![CategorySpend {
                category: Category::Other,
                total: 130.0,
                count: 2,
            }]
        );
    }

    #[test]
    fn orders_by_total_descending_with_category_name_tiebreak() {
        let conn = get_test_connection();
        // Shopping and education tie on total; education sorts first by name.
        insert(
            &conn,
            80.0,
            date!(2024 - 03 - 05),
            Category::Shopping,
            TransactionType::Expense,
        );
        insert(
            &conn,
            80.0,
            date!(2024 - 03 - 06),
            Category::Education,
            TransactionType::Expense,
        );
        insert(
            &conn,
            200.0,
            date!(2024 - 03 - 07),
            Category::Housing,
            TransactionType::Expense,
        );

        let got = sum_by_category(march_2024(), Some(TransactionType::Expense), &conn).unwrap();

        let categories: Vec<Category> = got.into_iter().map(|row| row.category).collect();
        assert_eq!(
            categories,
            [Category::Housing, Category::Education, Category::Shopping]
        );
    }

    #[test]
    fn sums_by_type_within_the_range() {
        let conn = get_test_connection();
        insert(
            &conn,
            100.0,
            date!(2024 - 03 - 05),
            Category::Food,
            TransactionType::Expense,
        );
        insert(
            &conn,
            3000.0,
            date!(2024 - 03 - 01),
            Category::Other,
            TransactionType::Income,
        );

        let mut got = sum_by_type(march_2024(), &conn).unwrap();
        got.sort_by_key(|row| row.count);

        assert_eq!(got.len(), 2);
        let income = got
            .iter()
            .find(|row| row.transaction_type == TransactionType::Income)
            .unwrap();
        assert_eq!(income.total, 3000.0);
        assert_eq!(income.count, 1);
    }

    #[test]
    fn sums_by_month_across_the_year() {
        let conn = get_test_connection();
        insert(
            &conn,
            100.0,
            date!(2024 - 03 - 05),
            Category::Food,
            TransactionType::Expense,
        );
        insert(
            &conn,
            60.0,
            date!(2024 - 03 - 25),
            Category::Food,
            TransactionType::Expense,
        );
        insert(
            &conn,
            40.0,
            date!(2024 - 07 - 01),
            Category::Shopping,
            TransactionType::Expense,
        );
        // A different year, must be excluded.
        insert(
            &conn,
            999.0,
            date!(2023 - 03 - 05),
            Category::Food,
            TransactionType::Expense,
        );

        let got = sum_by_month(2024, TransactionType::Expense, &conn).unwrap();

        assert_eq!(
            got,
            vec![
                MonthTotal {
                    month: 3,
                    total: 160.0,
                    count: 2,
                },
                MonthTotal {
                    month: 7,
                    total: 40.0,
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn recent_transactions_order_by_date_then_creation() {
        let conn = get_test_connection();
        // Two on the same date: the later insert must come first.
        insert(
            &conn,
            10.0,
            date!(2024 - 03 - 10),
            Category::Food,
            TransactionType::Expense,
        );
        insert(
            &conn,
            20.0,
            date!(2024 - 03 - 10),
            Category::Shopping,
            TransactionType::Expense,
        );
        insert(
            &conn,
            30.0,
            date!(2024 - 03 - 15),
            Category::Other,
            TransactionType::Income,
        );

        let got = recent_transactions(5, &conn).unwrap();

        let amounts: Vec<f64> = got.iter().map(|transaction| transaction.amount).collect();
        assert_eq!(amounts, [30.0, 20.0, 10.0]);
    }

    #[test]
    fn recent_transactions_respects_the_limit() {
        let conn = get_test_connection();
        for day in 1..=7 {
            insert(
                &conn,
                day as f64,
                date!(2024 - 03 - 01).replace_day(day).unwrap(),
                Category::Food,
                TransactionType::Expense,
            );
        }

        let got = recent_transactions(5, &conn).unwrap();

        assert_eq!(got.len(), 5);
        assert_eq!(got[0].amount, 7.0);
    }

    #[test]
    fn rerunning_a_query_yields_identical_rows() {
        let conn = get_test_connection();
        insert(
            &conn,
            100.0,
            date!(2024 - 03 - 05),
            Category::Food,
            TransactionType::Expense,
        );

        let first = sum_by_category(march_2024(), Some(TransactionType::Expense), &conn).unwrap();
        let second = sum_by_category(march_2024(), Some(TransactionType::Expense), &conn).unwrap();

        assert_eq!(first, second);
    }
}
