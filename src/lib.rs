//! Balancepad is a personal ledger for recording what you spent, on what,
//! in which currency, and when.
//!
//! The library holds the persistence layer for balance entries, the user's
//! default currency preference, and the editing logic that turns raw form
//! input into entries. Front ends (the `balancepad` command line tool, or any
//! other UI) drive it through [EntryStore] and [EditSession].

#![warn(missing_docs)]

mod currency;
mod database_id;
mod db;
mod editor;
mod entry;
pub mod logging;
mod preferences;
mod store;
mod timezone;

pub use currency::{CurrencyCode, DEFAULT_CURRENCY};
pub use database_id::EntryId;
pub use db::{SCHEMA_V1, SCHEMA_VERSION, initialize as initialize_db, schema_version};
pub use editor::{
    DATE_FORMAT, EditSession, EditedEntry, SessionState, build_entry, parse_amount,
    parse_event_date, resolve_default_currency,
};
pub use entry::{BalanceEntry, EntryDraft, date_to_millis};
pub use preferences::{get_default_currency, set_default_currency};
pub use store::EntryStore;
pub use timezone::{get_local_offset, today};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount text could not be parsed as a number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The event date could not be parsed, or does not exist in the calendar.
    ///
    /// Dates are expected in the form `yyyy-MM-dd`.
    #[error("\"{0}\" is not a valid date, expected yyyy-MM-dd")]
    InvalidDate(String),

    /// The currency code is not a three letter code such as "EUR".
    #[error("\"{0}\" is not a valid currency code")]
    InvalidCurrency(String),

    /// The requested entry was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested entry could not be found")]
    NotFound,

    /// Tried to save an editing session after it was discarded.
    #[error("the editing session was discarded and can no longer be saved")]
    SessionDiscarded,

    /// The database file was written by a newer version of the application.
    #[error("database schema version {0} is newer than the supported version")]
    UnsupportedSchemaVersion(i64),

    /// A timezone name could not be resolved.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
