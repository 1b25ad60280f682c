//! An owned handle to the application database.

use std::path::Path;

use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    BalanceEntry, CurrencyCode, EntryDraft, EntryId, Error,
    db::initialize,
    entry::{create_entry, delete_entry, get_all_entries, get_entry, update_entry},
    preferences::{get_default_currency, set_default_currency},
};

/// The store for balance entries and preferences.
///
/// The store owns its database connection. Create one when the application
/// starts and pass it to whatever needs it; the connection is released by
/// [EntryStore::close] or when the store is dropped.
///
/// Event dates are read and written as calendar days at the store's UTC
/// offset, which is UTC unless set with [EntryStore::with_utc_offset].
#[derive(Debug)]
pub struct EntryStore {
    connection: Connection,
    utc_offset: UtcOffset,
}

impl EntryStore {
    /// Open the database file at `path`, creating it if needed.
    ///
    /// The schema is created or upgraded to the current version.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema cannot be
    /// initialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        tracing::debug!("Opening database at {path:?}");

        Self::from_connection(Connection::open(path)?)
    }

    /// Open a store that lives only as long as the returned handle.
    pub fn open_in_memory() -> Result<Self, Error> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wrap an existing connection, initializing the schema.
    pub fn from_connection(connection: Connection) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self {
            connection,
            utc_offset: UtcOffset::UTC,
        })
    }

    /// Use the user's UTC offset for event dates.
    pub fn with_utc_offset(mut self, utc_offset: UtcOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    /// The UTC offset event dates are read and written at.
    pub fn utc_offset(&self) -> UtcOffset {
        self.utc_offset
    }

    /// The underlying database connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Release the database connection.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if SQLite could not close the connection,
    /// e.g. because of unfinalized statements.
    pub fn close(self) -> Result<(), Error> {
        self.connection
            .close()
            .map_err(|(_connection, error)| Error::from(error))
    }

    /// Insert a new entry and return its ID.
    pub fn create(&self, draft: &EntryDraft) -> Result<EntryId, Error> {
        create_entry(draft, self.utc_offset, &self.connection)
    }

    /// Delete an entry, returning `false` if it did not exist.
    pub fn delete(&self, id: EntryId) -> Result<bool, Error> {
        delete_entry(id, &self.connection)
    }

    /// Every entry, most recent event date first.
    pub fn fetch_all(&self) -> Result<Vec<BalanceEntry>, Error> {
        get_all_entries(self.utc_offset, &self.connection)
    }

    /// The entry with `id`, or `None` if there is no such entry.
    pub fn fetch_one(&self, id: EntryId) -> Result<Option<BalanceEntry>, Error> {
        get_entry(id, self.utc_offset, &self.connection)
    }

    /// Overwrite every field of an entry, returning `false` if it did not exist.
    pub fn update(&self, id: EntryId, draft: &EntryDraft) -> Result<bool, Error> {
        update_entry(id, draft, self.utc_offset, &self.connection)
    }

    /// The stored default currency preference, if any.
    pub fn default_currency_preference(&self) -> Result<Option<String>, Error> {
        get_default_currency(&self.connection)
    }

    /// Store the default currency preference.
    pub fn set_default_currency(&self, currency: &CurrencyCode) -> Result<(), Error> {
        set_default_currency(currency, &self.connection)
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::{
        UtcOffset,
        macros::{date, offset},
    };

    use crate::{
        CurrencyCode, EntryDraft, SCHEMA_V1, SCHEMA_VERSION, db::schema_version,
        entry::date_to_millis,
    };

    use super::EntryStore;

    #[test]
    fn open_in_memory_initializes_schema() {
        let store = EntryStore::open_in_memory().expect("Could not open store");

        assert_eq!(schema_version(store.connection()), Ok(SCHEMA_VERSION));
        assert_eq!(store.fetch_all(), Ok(vec![]));
    }

    #[test]
    fn close_succeeds() {
        let store = EntryStore::open_in_memory().unwrap();

        assert_eq!(store.close(), Ok(()));
    }

    #[test]
    fn version_one_rows_come_back_in_euros() {
        let connection = Connection::open_in_memory().unwrap();
        connection.execute_batch(SCHEMA_V1).unwrap();
        connection
            .execute(
                "INSERT INTO balance (description, amount, event_date) VALUES (?1, ?2, ?3)",
                ("Rent", 850.0, date_to_millis(date!(2011 - 03 - 01), UtcOffset::UTC)),
            )
            .unwrap();

        let store = EntryStore::from_connection(connection).expect("Could not upgrade store");

        let entries = store.fetch_all().unwrap();
        assert_eq!(
            entries,
            vec![
                EntryDraft::new(
                    "Rent",
                    850.0,
                    CurrencyCode::new_unchecked("EUR"),
                    date!(2011 - 03 - 01)
                )
                .with_id(1)
            ]
        );
    }

    #[test]
    fn preference_round_trips_through_store() {
        let store = EntryStore::open_in_memory().unwrap();

        store
            .set_default_currency(&CurrencyCode::new("NOK").unwrap())
            .unwrap();

        assert_eq!(
            store.default_currency_preference(),
            Ok(Some("NOK".to_owned()))
        );
    }

    #[test]
    fn version_one_local_midnight_keeps_its_day() {
        let connection = Connection::open_in_memory().unwrap();
        connection.execute_batch(SCHEMA_V1).unwrap();
        // 2024-01-15T00:00:00+02:00
        connection
            .execute(
                "INSERT INTO balance (description, amount, event_date) VALUES (?1, ?2, ?3)",
                ("Lunch", 12.5, 1_705_269_600_000_i64),
            )
            .unwrap();

        let store = EntryStore::from_connection(connection)
            .expect("Could not upgrade store")
            .with_utc_offset(offset!(+2));

        let entry = store.fetch_one(1).unwrap().expect("Entry should exist");
        assert_eq!(entry.event_date, date!(2024 - 01 - 15));
    }

    #[test]
    fn dates_are_written_at_the_store_offset() {
        let store = EntryStore::open_in_memory()
            .unwrap()
            .with_utc_offset(offset!(-5));
        let draft = EntryDraft::new(
            "Taxi",
            20.0,
            CurrencyCode::new_unchecked("USD"),
            date!(2024 - 07 - 04),
        );

        let id = store.create(&draft).unwrap();

        let millis: i64 = store
            .connection()
            .query_row("SELECT event_date FROM balance WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(millis, date_to_millis(date!(2024 - 07 - 04), offset!(-5)));
        assert_eq!(store.fetch_one(id), Ok(Some(draft.with_id(id))));
    }
}
