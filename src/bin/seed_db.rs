use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Duration, OffsetDateTime};

use spendwise::{NewExpense, StoreKind, open_stores};

/// A utility for creating a demo store for the spendwise server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the store to.
    #[arg(long, short)]
    output_path: String,

    /// The kind of store to create.
    #[arg(long, value_enum, default_value_t = StoreKind::Sqlite)]
    store: StoreKind,
}

/// (days ago, amount, category, payment mode, notes)
const SAMPLE_EXPENSES: [(i64, f64, &str, &str, &str); 10] = [
    (0, 120.0, "Groceries", "UPI", "Weekly vegetables"),
    (2, 45.5, "Travel", "Cash", "Auto to the station"),
    (5, 899.0, "Entertainment", "Credit Card", "Concert tickets"),
    (12, 1500.0, "Bills & Utilities", "Net Banking", "Electricity bill"),
    (20, 650.0, "Healthcare", "Debit Card", "Pharmacy"),
    (35, 18000.0, "Rental", "Net Banking", "Rent"),
    (40, 230.0, "Groceries", "UPI", "Milk and bread"),
    (48, 2400.0, "Education", "Credit Card", "Online course"),
    (66, 18000.0, "Rental", "Net Banking", "Rent"),
    (70, 5000.0, "Investment", "Net Banking", "Index fund"),
];

/// Create and populate a store for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'spendwise.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating {:?} store at {output_path:#?}", args.store);
    let state = open_stores(args.store, output_path)?;

    println!("Creating demo user...");
    let user = state.user_store.create("Demo")?;

    println!("Adding sample expenses...");
    let today = OffsetDateTime::now_utc().date();

    for (days_ago, amount, category, payment_mode, notes) in SAMPLE_EXPENSES {
        state.expense_store.create(NewExpense {
            user_id: user.user_id,
            amount,
            category: category.to_owned(),
            payment_mode: payment_mode.to_owned(),
            date: today - Duration::days(days_ago),
            notes: notes.to_owned(),
        })?;
    }

    println!("Success! Open /expenses?userId={}", user.user_id);

    Ok(())
}
