use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use fintrack_rs::{
    BudgetDraft, Category, TransactionDraft, TransactionType, create_budget, create_transaction,
    initialize_db,
};

/// A utility for creating a test database for the JSON API server of fintrack_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions and budgets...");

    let transactions = [
        (3200.0, date!(2024 - 03 - 01), "March salary", Category::Other, TransactionType::Income),
        (86.4, date!(2024 - 03 - 02), "Weekly groceries", Category::Food, TransactionType::Expense),
        (1450.0, date!(2024 - 03 - 03), "Rent", Category::Housing, TransactionType::Expense),
        (62.1, date!(2024 - 03 - 08), "Petrol", Category::Transportation, TransactionType::Expense),
        (24.0, date!(2024 - 03 - 09), "Cinema tickets", Category::Entertainment, TransactionType::Expense),
        (91.3, date!(2024 - 03 - 16), "Weekly groceries", Category::Food, TransactionType::Expense),
        (132.5, date!(2024 - 03 - 18), "Power and internet", Category::Utilities, TransactionType::Expense),
        (45.0, date!(2024 - 03 - 22), "Pharmacy", Category::Healthcare, TransactionType::Expense),
    ];

    for (amount, date, description, category, transaction_type) in transactions {
        create_transaction(
            &TransactionDraft {
                amount,
                date,
                description: description.to_owned(),
                category,
                transaction_type,
            },
            &conn,
        )?;
    }

    let budgets = [
        (Category::Food, 400.0),
        (Category::Housing, 1500.0),
        (Category::Transportation, 120.0),
        (Category::Entertainment, 50.0),
    ];

    for (category, amount) in budgets {
        create_budget(
            &BudgetDraft {
                category,
                amount,
                month: 3,
                year: 2024,
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
