use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

use balancepad::{
    BalanceEntry, CurrencyCode, EditSession, EntryId, EntryStore, Error as LedgerError,
    get_local_offset, logging::setup_logging, parse_event_date, resolve_default_currency, today,
};

/// Record, list, edit and delete entries in a balancepad ledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: PathBuf,

    /// The local timezone as a canonical timezone name, e.g. "Europe/Helsinki".
    ///
    /// Used to decide which day "today" is for new entries.
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all entries, most recent first.
    List {
        /// Print the entries as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show a single entry.
    Show { id: EntryId },
    /// Record a new entry. Fields that are not given start with their defaults.
    Add(EntryFields),
    /// Change an entry. Fields that are not given keep their stored value.
    Edit {
        id: EntryId,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Delete an entry.
    Delete { id: EntryId },
    /// Show the currency new entries start with, or set it to CODE.
    DefaultCurrency { code: Option<String> },
}

#[derive(clap::Args, Debug)]
struct EntryFields {
    /// What the money was spent on or received for.
    #[arg(short, long)]
    description: Option<String>,

    /// The amount, e.g. 12.50. Left empty it is recorded as zero.
    #[arg(short, long, allow_hyphen_values = true)]
    amount: Option<String>,

    /// A three letter currency code, e.g. EUR.
    #[arg(short, long)]
    currency: Option<String>,

    /// When it happened, as yyyy-MM-dd.
    #[arg(long)]
    date: Option<String>,
}

fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode, Box<dyn Error>> {
    let offset = get_local_offset(&args.timezone)
        .ok_or_else(|| LedgerError::InvalidTimezone(args.timezone.clone()))?;

    let store = EntryStore::open(&args.db_path)?.with_utc_offset(offset);

    let code = match args.command {
        Command::List { json } => {
            list_entries(&store, json)?;
            ExitCode::SUCCESS
        }
        Command::Show { id } => match store.fetch_one(id)? {
            Some(entry) => {
                println!("{}", format_entry(&entry));
                ExitCode::SUCCESS
            }
            None => not_found(id),
        },
        Command::Add(fields) => {
            let mut session = EditSession::new(&store, today(offset))?;
            apply_fields(&mut session, fields)?;
            report_saved(session.suspend()?);
            ExitCode::SUCCESS
        }
        Command::Edit { id, fields } => match EditSession::open(&store, id) {
            Ok(mut session) => {
                apply_fields(&mut session, fields)?;
                report_saved(session.suspend()?);
                ExitCode::SUCCESS
            }
            Err(LedgerError::NotFound) => not_found(id),
            Err(error) => return Err(error.into()),
        },
        Command::Delete { id } => {
            if store.delete(id)? {
                println!("Deleted entry {id}");
                ExitCode::SUCCESS
            } else {
                not_found(id)
            }
        }
        Command::DefaultCurrency { code: Some(code) } => {
            let currency = CurrencyCode::new(&code)?;
            store.set_default_currency(&currency)?;
            println!("{currency}");
            ExitCode::SUCCESS
        }
        Command::DefaultCurrency { code: None } => {
            let preference = store.default_currency_preference()?;
            println!("{}", resolve_default_currency(preference.as_deref()));
            ExitCode::SUCCESS
        }
    };

    store.close()?;

    Ok(code)
}

fn list_entries(store: &EntryStore, json: bool) -> Result<(), Box<dyn Error>> {
    let entries = store.fetch_all()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No entries yet.");
    } else {
        for entry in &entries {
            println!("{}", format_entry(entry));
        }
    }

    Ok(())
}

/// Copy the fields given on the command line into the session.
///
/// The date is checked here so that a typo is reported against the text the
/// user typed rather than the parsed year, month and day.
fn apply_fields(session: &mut EditSession<'_>, fields: EntryFields) -> Result<(), LedgerError> {
    if let Some(description) = fields.description {
        session.set_description(&description);
    }

    if let Some(amount) = fields.amount {
        session.set_amount_text(&amount);
    }

    if let Some(currency) = fields.currency {
        session.set_currency(&currency);
    }

    if let Some(date) = fields.date {
        let date = parse_event_date(&date)?;
        session.set_date(date.year(), u8::from(date.month()), date.day());
    }

    Ok(())
}

fn report_saved(saved_id: Option<EntryId>) {
    if let Some(id) = saved_id {
        println!("Saved entry {id}");
    }
}

fn not_found(id: EntryId) -> ExitCode {
    eprintln!("No entry with ID {id}");
    ExitCode::FAILURE
}

fn format_entry(entry: &BalanceEntry) -> String {
    format!(
        "{:>5}  {}  {:>12.precision$} {}  {}",
        entry.id,
        entry.event_date,
        entry.amount,
        entry.currency,
        entry.description,
        precision = entry.currency.minor_units(),
    )
}
