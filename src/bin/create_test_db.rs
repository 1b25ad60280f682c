use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime, UtcOffset};

use balancepad::{
    CurrencyCode, EntryDraft, EntryStore, SCHEMA_V1, date_to_millis, logging::setup_logging,
};

/// A utility for creating a test database for balancepad.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// Write a database in the first schema version, before entries had a
    /// currency, to try out the upgrade path.
    #[arg(long)]
    legacy: bool,
}

const SAMPLE_ENTRIES: &[(&str, f64, &str, i64)] = &[
    ("Coffee", 3.5, "EUR", 0),
    ("Groceries", 54.2, "EUR", 1),
    ("Train ticket", 12.0, "SEK", 3),
    ("Book", 19.99, "USD", 8),
    ("Salary", -2500.0, "EUR", 14),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

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
    let today = OffsetDateTime::now_utc().date();

    if args.legacy {
        create_legacy_db(output_path, today)?;
    } else {
        create_db(output_path, today)?;
    }

    println!("Success!");

    Ok(())
}

fn create_db(output_path: &Path, today: Date) -> Result<(), Box<dyn Error>> {
    let store = EntryStore::open(output_path)?;

    println!("Creating sample entries...");
    for (description, amount, currency, days_ago) in SAMPLE_ENTRIES {
        store.create(&EntryDraft::new(
            description,
            *amount,
            CurrencyCode::new(currency)?,
            today - Duration::days(*days_ago),
        ))?;
    }

    store.close()?;

    Ok(())
}

fn create_legacy_db(output_path: &Path, today: Date) -> Result<(), Box<dyn Error>> {
    let conn = Connection::open(output_path)?;
    conn.execute_batch(SCHEMA_V1)?;

    println!("Creating sample entries without currencies...");
    for (description, amount, _, days_ago) in SAMPLE_ENTRIES {
        let millis = date_to_millis(today - Duration::days(*days_ago), UtcOffset::UTC);

        conn.execute(
            "INSERT INTO balance (description, amount, event_date) VALUES (?1, ?2, ?3)",
            (description, amount, millis),
        )?;
    }

    Ok(())
}
