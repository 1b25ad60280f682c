//! Core balance entry domain types.

use serde::Serialize;
use time::Date;

use crate::{CurrencyCode, EntryId};

/// A recorded transaction that has been saved to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceEntry {
    /// The ID assigned by the store when the entry was created.
    pub id: EntryId,
    /// What the money was spent on or received for. May be empty.
    pub description: String,
    /// The amount of money, stored exactly as entered.
    pub amount: f64,
    /// The currency the amount is in.
    pub currency: CurrencyCode,
    /// The day the transaction happened.
    pub event_date: Date,
}

impl BalanceEntry {
    /// The field values of this entry without its ID.
    pub fn draft(&self) -> EntryDraft {
        EntryDraft {
            description: self.description.clone(),
            amount: self.amount,
            currency: self.currency.clone(),
            event_date: self.event_date,
        }
    }
}

/// The field values of a balance entry that has not been given an ID.
///
/// Drafts are what callers hand to the store to create a new entry or to
/// overwrite an existing one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDraft {
    /// What the money was spent on or received for. May be empty.
    pub description: String,
    /// The amount of money, stored exactly as entered.
    pub amount: f64,
    /// The currency the amount is in.
    pub currency: CurrencyCode,
    /// The day the transaction happened.
    pub event_date: Date,
}

impl EntryDraft {
    /// Create a draft from already validated values.
    pub fn new(description: &str, amount: f64, currency: CurrencyCode, event_date: Date) -> Self {
        Self {
            description: description.to_owned(),
            amount,
            currency,
            event_date,
        }
    }

    /// Attach a store assigned ID to the draft.
    pub fn with_id(self, id: EntryId) -> BalanceEntry {
        BalanceEntry {
            id,
            description: self.description,
            amount: self.amount,
            currency: self.currency,
            event_date: self.event_date,
        }
    }
}
