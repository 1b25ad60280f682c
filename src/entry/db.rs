//! Database operations for balance entries.

use rusqlite::{Connection, OptionalExtension, Row, types::Type};
use time::{Date, OffsetDateTime, UtcOffset};

use crate::{
    EntryId, Error,
    entry::{BalanceEntry, EntryDraft},
};

/// Create an entry and return its generated ID.
///
/// `offset` is the user's UTC offset, see [date_to_millis].
///
/// # Errors
/// Returns [Error::SqlError] if the row could not be written. Nothing is
/// written in that case.
pub fn create_entry(
    draft: &EntryDraft,
    offset: UtcOffset,
    connection: &Connection,
) -> Result<EntryId, Error> {
    connection.execute(
        "INSERT INTO balance (description, amount, currency, event_date)
         VALUES (?1, ?2, ?3, ?4);",
        (
            &draft.description,
            draft.amount,
            &draft.currency,
            date_to_millis(draft.event_date, offset),
        ),
    )?;

    let id = connection.last_insert_rowid();
    tracing::info!("Created balance entry {id}");

    Ok(id)
}

/// Retrieve a single entry by ID, or `None` if there is no such entry.
pub fn get_entry(
    entry_id: EntryId,
    offset: UtcOffset,
    connection: &Connection,
) -> Result<Option<BalanceEntry>, Error> {
    let entry = connection
        .prepare(
            "SELECT id, description, amount, currency, event_date FROM balance WHERE id = :id;",
        )?
        .query_row(&[(":id", &entry_id)], |row| map_row(row, offset))
        .optional()?;

    if entry.is_none() {
        tracing::debug!("No balance entry with ID {entry_id}");
    }

    Ok(entry)
}

/// Retrieve all entries, most recent event date first.
///
/// Entries on the same day are ordered newest ID first.
pub fn get_all_entries(
    offset: UtcOffset,
    connection: &Connection,
) -> Result<Vec<BalanceEntry>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, currency, event_date FROM balance
             ORDER BY event_date DESC, id DESC;",
        )?
        .query_map([], |row| map_row(row, offset))?
        .map(|maybe_entry| maybe_entry.map_err(|error| error.into()))
        .collect()
}

/// Overwrite every field of an entry.
///
/// Returns `false` if there is no entry with `entry_id`.
pub fn update_entry(
    entry_id: EntryId,
    draft: &EntryDraft,
    offset: UtcOffset,
    connection: &Connection,
) -> Result<bool, Error> {
    let rows_affected = connection.execute(
        "UPDATE balance SET description = ?1, amount = ?2, currency = ?3, event_date = ?4
         WHERE id = ?5",
        (
            &draft.description,
            draft.amount,
            &draft.currency,
            date_to_millis(draft.event_date, offset),
            entry_id,
        ),
    )?;

    if rows_affected > 0 {
        tracing::info!("Updated balance entry {entry_id}");
    }

    Ok(rows_affected > 0)
}

/// Delete an entry by ID.
///
/// Returns `false` if there is no entry with `entry_id`.
pub fn delete_entry(entry_id: EntryId, connection: &Connection) -> Result<bool, Error> {
    let rows_affected = connection.execute("DELETE FROM balance WHERE id = ?1", [entry_id])?;

    if rows_affected > 0 {
        tracing::info!("Deleted balance entry {entry_id}");
    }

    Ok(rows_affected > 0)
}

/// Create the balance table at the current schema version.
pub(crate) fn create_balance_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS balance (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            currency TEXT NOT NULL DEFAULT 'EUR',
            event_date INTEGER NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// The stored form of an event date: Unix time in milliseconds of local
/// midnight at the user's UTC `offset`.
///
/// This is the encoding databases from the first schema version already use,
/// so legacy rows read back as the day the user picked.
pub fn date_to_millis(date: Date, offset: UtcOffset) -> i64 {
    date.midnight().assume_offset(offset).unix_timestamp() * 1000
}

/// The calendar date of a stored instant, seen at the user's UTC `offset`.
fn millis_to_date(millis: i64, offset: UtcOffset) -> Result<Date, time::error::ComponentRange> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map(|date_time| date_time.to_offset(offset).date())
}

fn map_row(row: &Row, offset: UtcOffset) -> Result<BalanceEntry, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let amount = row.get(2)?;
    let currency = row.get(3)?;
    let millis: i64 = row.get(4)?;
    let event_date = millis_to_date(millis, offset).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Integer, Box::new(error))
    })?;

    Ok(BalanceEntry {
        id,
        description,
        amount,
        currency,
        event_date,
    })
}
