//! Database ID type definition.

/// Alias for the integer type the store assigns to balance entries.
pub type EntryId = i64;
