//! The lifecycle of editing a single balance entry.

use time::Date;

use crate::{
    EntryId, EntryStore, Error,
    editor::{build_entry, resolve_default_currency},
};

/// Where an [EditSession] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Editing a new entry filled with defaults; nothing has been saved yet.
    New,
    /// Editing an existing entry whose fields were loaded from the store.
    Populated,
    /// The fields have been changed since they were last loaded or saved.
    Dirty,
    /// The fields were written to the store.
    Saved,
    /// The user cancelled. Nothing more will be written.
    Discarded,
}

/// An editing session for one balance entry.
///
/// The session holds the raw field values the way a form would and only
/// validates them when saving. Sessions save whenever the front end leaves
/// them, see [EditSession::suspend], unless the user discarded their changes.
#[derive(Debug)]
pub struct EditSession<'a> {
    store: &'a EntryStore,
    row_id: Option<EntryId>,
    description: String,
    amount_text: String,
    currency: String,
    date: (i32, u8, u8),
    state: SessionState,
}

impl<'a> EditSession<'a> {
    /// Start editing a new entry dated `today` in the user's default currency.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the currency preference cannot be read.
    pub fn new(store: &'a EntryStore, today: Date) -> Result<Self, Error> {
        let preference = store.default_currency_preference()?;
        let currency = resolve_default_currency(preference.as_deref());

        Ok(Self {
            store,
            row_id: None,
            description: String::new(),
            amount_text: String::new(),
            currency: currency.to_string(),
            date: date_triple(today),
            state: SessionState::New,
        })
    }

    /// Start editing the stored entry with `id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if there is no such entry, or an
    /// [Error::SqlError] if it could not be read.
    pub fn open(store: &'a EntryStore, id: EntryId) -> Result<Self, Error> {
        let entry = store.fetch_one(id)?.ok_or(Error::NotFound)?;

        Ok(Self {
            store,
            row_id: Some(entry.id),
            description: entry.description,
            amount_text: entry.amount.to_string(),
            currency: entry.currency.to_string(),
            date: date_triple(entry.event_date),
            state: SessionState::Populated,
        })
    }

    /// The current state of the session.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The ID of the entry, once it exists in the store.
    pub fn row_id(&self) -> Option<EntryId> {
        self.row_id
    }

    /// The description field.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The amount field, as typed.
    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    /// The currency field.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// The date field as `(year, month, day)`, months counted from 1.
    pub fn date(&self) -> (i32, u8, u8) {
        self.date
    }

    /// Change the description field.
    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_owned();
        self.mark_dirty();
    }

    /// Change the amount field. The text is validated when saving.
    pub fn set_amount_text(&mut self, amount_text: &str) {
        self.amount_text = amount_text.to_owned();
        self.mark_dirty();
    }

    /// Change the currency field. The code is validated when saving.
    pub fn set_currency(&mut self, currency: &str) {
        self.currency = currency.to_owned();
        self.mark_dirty();
    }

    /// Change the date field. The date is validated when saving.
    pub fn set_date(&mut self, year: i32, month: u8, day: u8) {
        self.date = (year, month, day);
        self.mark_dirty();
    }

    /// Validate the fields and write them to the store.
    ///
    /// A new entry is created on the first save. Later saves update that same
    /// entry. On failure the store and the session state are unchanged.
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::SessionDiscarded] if the session was discarded,
    /// - or a validation error ([Error::InvalidAmount], [Error::InvalidCurrency], [Error::InvalidDate]),
    /// - or [Error::NotFound] if the entry was deleted while it was being edited,
    /// - or [Error::SqlError] if the write failed.
    pub fn save(&mut self) -> Result<EntryId, Error> {
        if self.state == SessionState::Discarded {
            return Err(Error::SessionDiscarded);
        }

        let edited = build_entry(
            self.row_id,
            &self.description,
            &self.amount_text,
            &self.currency,
            self.date,
        )?;

        let id = match edited.id {
            None => self.store.create(&edited.draft)?,
            Some(id) => {
                if !self.store.update(id, &edited.draft)? {
                    return Err(Error::NotFound);
                }
                id
            }
        };

        self.row_id = Some(id);
        self.currency = edited.draft.currency.to_string();
        self.state = SessionState::Saved;

        Ok(id)
    }

    /// Abandon the session without writing anything.
    pub fn discard(&mut self) {
        tracing::debug!("Discarded edits to entry {:?}", self.row_id);
        self.state = SessionState::Discarded;
    }

    /// Called when the front end leaves the session, e.g. when the user
    /// navigates away.
    ///
    /// Saves the fields unless the session was discarded, returning the ID of
    /// the saved entry, or `None` when nothing was saved.
    ///
    /// # Errors
    /// Returns the same errors as [EditSession::save], apart from
    /// [Error::SessionDiscarded].
    pub fn suspend(&mut self) -> Result<Option<EntryId>, Error> {
        match self.state {
            SessionState::Discarded => Ok(None),
            _ => self.save().map(Some),
        }
    }

    fn mark_dirty(&mut self) {
        if self.state != SessionState::Discarded {
            self.state = SessionState::Dirty;
        }
    }
}

fn date_triple(date: Date) -> (i32, u8, u8) {
    (date.year(), u8::from(date.month()), date.day())
}
