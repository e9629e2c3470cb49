use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_splitter::{NewExpense, Participant, create_expense, initialize_db};

/// A utility for creating a test database for the expense_splitter server.
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

    println!("Creating test expenses...");

    let today = OffsetDateTime::now_utc().date();
    let samples = [
        (30, "Rent", "Housing", "Bank transfer", 24000.0, Participant::Person1, (12000.0, 12000.0)),
        (21, "Groceries", "Food", "Card", 3150.5, Participant::Person2, (1575.25, 1575.25)),
        (14, "Electricity bill", "Utilities", "UPI", 1820.0, Participant::Person1, (910.0, 910.0)),
        (7, "Dinner out", "Food", "Cash", 2400.0, Participant::Person2, (1600.0, 800.0)),
        (2, "Train tickets", "Travel", "Card", 1300.0, Participant::Person1, (650.0, 400.0)),
    ];

    for (days_ago, description, category, payment_mode, total_amount, paid_by, shares) in samples {
        create_expense(
            NewExpense {
                date: today - Duration::days(days_ago),
                description: description.to_owned(),
                category: category.to_owned(),
                payment_mode: payment_mode.to_owned(),
                total_amount,
                paid_by,
                person1_share: shares.0,
                person2_share: shares.1,
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
