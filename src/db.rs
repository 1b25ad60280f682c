//! Schema creation and upgrades for the application database.
//!
//! The schema version lives in SQLite's `user_version` pragma. A fresh
//! database reports version 0 and gets the current schema directly, older
//! databases are upgraded in place one version at a time.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, entry::create_balance_table, preferences::create_preference_table};

/// The schema version written by this version of the application.
pub const SCHEMA_VERSION: i64 = 2;

/// The first released schema, before entries recorded a currency.
///
/// Kept so that databases from that release can be reproduced for testing
/// the upgrade path.
pub const SCHEMA_V1: &str = "CREATE TABLE balance (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    amount REAL NOT NULL,
    event_date INTEGER NOT NULL
);
PRAGMA user_version = 1;";

/// Upgrades from version N to N+1, as `(from_version, sql)`.
const MIGRATIONS: &[(i64, &str)] =
    &[(1, "ALTER TABLE balance ADD COLUMN currency TEXT NOT NULL DEFAULT 'EUR';")];

/// Read the schema version stored in the database file.
pub fn schema_version(connection: &Connection) -> Result<i64, Error> {
    let version = connection.pragma_query_value(None, "user_version", |row| row.get(0))?;

    Ok(version)
}

/// Create the application tables, or upgrade them if the database was written
/// by an older version of the application.
///
/// Calling this on an up to date database does nothing.
///
/// # Errors
/// Returns an [Error::UnsupportedSchemaVersion] if the database is newer than
/// [SCHEMA_VERSION], or an [Error::SqlError] if any statement fails. A failed
/// upgrade is rolled back and leaves the file at its previous version.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    let stored_version = schema_version(&transaction)?;

    match stored_version {
        0 => {
            create_balance_table(&transaction)?;
        }
        version if version > SCHEMA_VERSION || version < 0 => {
            return Err(Error::UnsupportedSchemaVersion(version));
        }
        version => upgrade(&transaction, version)?,
    }

    create_preference_table(&transaction)?;
    set_schema_version(&transaction, SCHEMA_VERSION)?;

    transaction.commit()?;

    Ok(())
}

fn upgrade(connection: &Connection, from_version: i64) -> Result<(), Error> {
    for (version, sql) in MIGRATIONS {
        if *version < from_version {
            continue;
        }

        tracing::warn!(
            "Upgrading database from version {} to {}",
            version,
            version + 1
        );
        connection.execute_batch(sql)?;
    }

    Ok(())
}

fn set_schema_version(connection: &Connection, version: i64) -> Result<(), Error> {
    connection.pragma_update(None, "user_version", version)?;

    Ok(())
}
