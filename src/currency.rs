//! Currency codes attached to balance entries.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::Serialize;

use crate::Error;

/// The currency used when the user has not chosen a default.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// A three letter, upper case currency code such as "EUR" or "USD".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Hash)]
#[serde(into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a currency code, normalising it to upper case.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidCurrency] if `code` is not
    /// exactly three ASCII letters once surrounding whitespace is removed.
    pub fn new(code: &str) -> Result<Self, Error> {
        let trimmed = code.trim();

        if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(Error::InvalidCurrency(code.to_owned()))
        }
    }

    /// Create a currency code without validation.
    ///
    /// The caller should ensure that the string is a valid, upper case code.
    pub fn new_unchecked(code: &str) -> Self {
        Self(code.to_owned())
    }

    /// The number of digits after the decimal point amounts in this currency
    /// are shown with, following ISO 4217.
    pub fn minor_units(&self) -> usize {
        match self.0.as_str() {
            "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF"
            | "UGX" | "UYI" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
            "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
            _ => 2,
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_CURRENCY)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for CurrencyCode {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for CurrencyCode {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        // Rows written before the currency column existed were given the
        // default by the migration, so stored codes are trusted.
        String::column_result(value).map(Self)
    }
}
