//! Turning raw form input into validated entry values.

use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};

use crate::{CurrencyCode, EntryDraft, EntryId, Error};

/// The format event dates are written in, `yyyy-MM-dd`.
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Date pickers may render the month and day without a leading zero, e.g. "2024-1-5".
const UNPADDED_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month padding:none]-[day padding:none]");

/// The result of validating an editor form.
#[derive(Debug, Clone, PartialEq)]
pub struct EditedEntry {
    /// The ID of the entry being edited, or `None` for a new entry.
    pub id: Option<EntryId>,
    /// The validated field values.
    pub draft: EntryDraft,
}

/// Parse the amount field.
///
/// Blank input is treated as zero.
///
/// # Errors
/// Returns [Error::InvalidAmount] if the text is not a finite number.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Ok(0.0);
    }

    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}

/// Parse an event date written as `yyyy-MM-dd`.
///
/// Surrounding whitespace is ignored and the month and day may be written
/// without a leading zero.
///
/// # Errors
/// Returns [Error::InvalidDate] if the text is not a real calendar date in
/// that format.
pub fn parse_event_date(text: &str) -> Result<Date, Error> {
    let trimmed = text.trim();

    Date::parse(trimmed, DATE_FORMAT)
        .or_else(|_| Date::parse(trimmed, UNPADDED_DATE_FORMAT))
        .map_err(|error| {
            tracing::debug!("Could not parse event date {text:?}: {error}");
            Error::InvalidDate(text.to_owned())
        })
}

/// The currency new entries should start with.
///
/// Falls back to [crate::DEFAULT_CURRENCY] when the user has not chosen one,
/// or when the stored choice is not a valid currency code.
pub fn resolve_default_currency(preference: Option<&str>) -> CurrencyCode {
    match preference.map(CurrencyCode::new) {
        Some(Ok(currency)) => currency,
        Some(Err(error)) => {
            tracing::warn!("Ignoring default currency preference: {error}");
            CurrencyCode::default()
        }
        None => CurrencyCode::default(),
    }
}

/// Validate the editor's fields and combine them into an entry.
///
/// `date` is a `(year, month, day)` triple with the month counted from 1.
///
/// # Errors
/// Returns a:
/// - [Error::InvalidAmount] if `amount_text` is not a number,
/// - or [Error::InvalidCurrency] if `currency_code` is not a currency code,
/// - or [Error::InvalidDate] if `date` does not exist in the calendar.
pub fn build_entry(
    id: Option<EntryId>,
    description: &str,
    amount_text: &str,
    currency_code: &str,
    date: (i32, u8, u8),
) -> Result<EditedEntry, Error> {
    let amount = parse_amount(amount_text)?;
    let currency = CurrencyCode::new(currency_code)?;
    let event_date = date_from_triple(date)?;

    Ok(EditedEntry {
        id,
        draft: EntryDraft::new(description, amount, currency, event_date),
    })
}

fn date_from_triple((year, month, day): (i32, u8, u8)) -> Result<Date, Error> {
    Month::try_from(month)
        .and_then(|month| Date::from_calendar_date(year, month, day))
        .map_err(|_| Error::InvalidDate(format!("{year}-{month}-{day}")))
}

#[cfg(test)]
mod parse_amount_tests {
    use crate::Error;

    use super::parse_amount;

    #[test]
    fn empty_text_is_zero() {
        assert_eq!(parse_amount(""), Ok(0.0));
    }

    #[test]
    fn blank_text_is_zero() {
        assert_eq!(parse_amount("  \t"), Ok(0.0));
    }

    #[test]
    fn parses_decimal() {
        assert_eq!(parse_amount("12.50"), Ok(12.5));
    }

    #[test]
    fn parses_negative_with_whitespace() {
        assert_eq!(parse_amount(" -3.25 "), Ok(-3.25));
    }

    #[test]
    fn rejects_text() {
        assert_eq!(
            parse_amount("abc"),
            Err(Error::InvalidAmount("abc".to_owned()))
        );
    }

    #[test]
    fn rejects_non_finite_numbers() {
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
    }
}

#[cfg(test)]
mod parse_event_date_tests {
    use time::macros::date;

    use crate::Error;

    use super::parse_event_date;

    #[test]
    fn parses_padded_date() {
        assert_eq!(parse_event_date("2024-01-15"), Ok(date!(2024 - 01 - 15)));
    }

    #[test]
    fn parses_unpadded_date_with_trailing_space() {
        assert_eq!(parse_event_date("2024-1-5 "), Ok(date!(2024 - 01 - 05)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            parse_event_date("yesterday"),
            Err(Error::InvalidDate("yesterday".to_owned()))
        );
    }

    #[test]
    fn rejects_impossible_date() {
        assert!(parse_event_date("2023-02-29").is_err());
    }

    #[test]
    fn rejects_empty_text() {
        assert!(parse_event_date("").is_err());
    }
}

#[cfg(test)]
mod resolve_default_currency_tests {
    use super::resolve_default_currency;

    #[test]
    fn unset_preference_is_euro() {
        assert_eq!(resolve_default_currency(None).as_ref(), "EUR");
    }

    #[test]
    fn set_preference_is_used() {
        assert_eq!(resolve_default_currency(Some("USD")).as_ref(), "USD");
    }

    #[test]
    fn invalid_preference_falls_back_to_euro() {
        assert_eq!(resolve_default_currency(Some("dollars")).as_ref(), "EUR");
    }
}
