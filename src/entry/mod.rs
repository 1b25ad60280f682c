//! Balance entries and their storage.

mod db;
mod domain;

pub use db::{
    create_entry, date_to_millis, delete_entry, get_all_entries, get_entry, update_entry,
};
pub use domain::{BalanceEntry, EntryDraft};

pub(crate) use db::create_balance_table;
