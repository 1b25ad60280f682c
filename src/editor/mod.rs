//! Validation of user input and the entry editing lifecycle.

mod parse;
mod session;

pub use parse::{
    DATE_FORMAT, EditedEntry, build_entry, parse_amount, parse_event_date,
    resolve_default_currency,
};
pub use session::{EditSession, SessionState};
