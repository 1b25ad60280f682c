//! User preference storage.
//!
//! Currently stores the currency that new entries start with.

use rusqlite::{Connection, OptionalExtension};

use crate::{CurrencyCode, Error};

const PREFERENCE_TABLE: &str = "preference";
const DEFAULT_CURRENCY_KEY: &str = "default_currency";

/// Create the key/value preference table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub(crate) fn create_preference_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            table = PREFERENCE_TABLE
        ),
        (),
    )?;

    Ok(())
}

/// Gets the raw default currency preference, or `None` if the user never set one.
///
/// The value is returned as stored so that callers can decide how to treat a
/// value that is not a valid currency code, see
/// [crate::resolve_default_currency].
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_default_currency(connection: &Connection) -> Result<Option<String>, Error> {
    let value = connection
        .prepare(&format!(
            "SELECT value FROM {table} WHERE key = ?1",
            table = PREFERENCE_TABLE
        ))?
        .query_row([DEFAULT_CURRENCY_KEY], |row| row.get(0))
        .optional()?;

    Ok(value)
}

/// Saves the currency that new entries should start with, replacing any
/// previous choice.
///
/// # Errors
/// Returns [Error::SqlError] if the write fails.
pub fn set_default_currency(currency: &CurrencyCode, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        &format!(
            "INSERT INTO {table} (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            table = PREFERENCE_TABLE
        ),
        (DEFAULT_CURRENCY_KEY, currency),
    )?;

    tracing::info!("Default currency set to {currency}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;
    use crate::db::initialize;

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn unset_preference_is_none() {
        let conn = get_test_connection();

        assert_eq!(get_default_currency(&conn), Ok(None));
    }

    #[test]
    fn set_and_get_default_currency_works() {
        let conn = get_test_connection();

        set_default_currency(&CurrencyCode::new("USD").unwrap(), &conn).unwrap();

        assert_eq!(get_default_currency(&conn), Ok(Some("USD".to_owned())));
    }

    #[test]
    fn set_default_currency_replaces_existing() {
        let conn = get_test_connection();
        set_default_currency(&CurrencyCode::new("USD").unwrap(), &conn).unwrap();

        set_default_currency(&CurrencyCode::new("SEK").unwrap(), &conn).unwrap();

        assert_eq!(get_default_currency(&conn), Ok(Some("SEK".to_owned())));
    }
}
