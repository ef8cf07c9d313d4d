//! Calendar date of a visit and Indonesian date labels.
//!
//! Visit dates are naive calendar dates exchanged as ISO `YYYY-MM-DD` on
//! every boundary. No timezone conversion is ever applied to them.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Indonesian month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Indonesian name for a 1-indexed month, `None` outside `1..=12`.
///
/// # Examples
/// ```
/// use guestbook::domain::month_name;
///
/// assert_eq!(month_name(3), Some("Maret"));
/// assert_eq!(month_name(13), None);
/// ```
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTH_NAMES.get(index).copied()
}

/// Errors raised when parsing a visit date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VisitDateError {
    /// No date was supplied.
    #[error("visit date is empty")]
    Empty,
    /// The text is not a valid `YYYY-MM-DD` calendar date.
    #[error("visit date `{0}` is not a valid YYYY-MM-DD calendar date")]
    Invalid(String),
}

/// Validated calendar date of a visit.
///
/// # Examples
/// ```
/// use guestbook::domain::VisitDate;
///
/// let date: VisitDate = "2025-03-12".parse().expect("valid date");
/// assert_eq!(date.month(), 3);
/// assert_eq!(date.long_form(), "12 Maret 2025");
/// assert_eq!(date.to_string(), "2025-03-12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VisitDate(NaiveDate);

impl VisitDate {
    /// Parse strict ISO `YYYY-MM-DD` text, ignoring surrounding whitespace.
    ///
    /// # Errors
    /// Returns [`VisitDateError::Empty`] for blank input and
    /// [`VisitDateError::Invalid`] for anything that is not a real date.
    pub fn parse(raw: &str) -> Result<Self, VisitDateError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(VisitDateError::Empty);
        }
        // chrono accepts unpadded fields; the wire form is always zero padded.
        if trimmed.len() != 10 {
            return Err(VisitDateError::Invalid(trimmed.to_owned()));
        }
        NaiveDate::parse_from_str(trimmed, ISO_FORMAT)
            .map(Self)
            .map_err(|_| VisitDateError::Invalid(trimmed.to_owned()))
    }

    /// Wrap an existing calendar date.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Underlying calendar date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Day of month, `1..=31`.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// 1-indexed month, `1..=12`.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Long Indonesian form such as `12 Maret 2025`.
    pub fn long_form(&self) -> String {
        long_form(self.0)
    }
}

/// Long Indonesian form of any calendar date.
pub fn long_form(date: NaiveDate) -> String {
    let month = month_name(date.month()).unwrap_or_default();
    format!("{} {} {}", date.day(), month, date.year())
}

impl fmt::Display for VisitDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl FromStr for VisitDate {
    type Err = VisitDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VisitDate {
    type Error = VisitDateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VisitDate> for String {
    fn from(value: VisitDate) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    //! Parsing and label coverage.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2025-03-12", 2025, 3, 12)]
    #[case(" 2024-02-29 ", 2024, 2, 29)]
    fn parses_iso_dates(#[case] raw: &str, #[case] year: i32, #[case] month: u32, #[case] day: u32) {
        let date = VisitDate::parse(raw).expect("valid date");
        assert_eq!((date.year(), date.month(), date.day()), (year, month, day));
    }

    #[rstest]
    #[case("2025-02-30")]
    #[case("2023-02-29")]
    #[case("12/03/2025")]
    #[case("2025-3-1")]
    #[case("kemarin")]
    fn rejects_invalid_dates(#[case] raw: &str) {
        assert_eq!(
            VisitDate::parse(raw),
            Err(VisitDateError::Invalid(raw.to_owned()))
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_empty_dates(#[case] raw: &str) {
        assert_eq!(VisitDate::parse(raw), Err(VisitDateError::Empty));
    }

    #[rstest]
    #[case(1, Some("Januari"))]
    #[case(12, Some("Desember"))]
    #[case(0, None)]
    #[case(13, None)]
    fn month_names_are_one_indexed(#[case] month: u32, #[case] expected: Option<&str>) {
        assert_eq!(month_name(month), expected);
    }

    #[rstest]
    fn long_form_uses_indonesian_month() {
        let date = VisitDate::parse("2025-08-01").expect("valid date");
        assert_eq!(date.long_form(), "1 Agustus 2025");
    }

    #[rstest]
    fn serialises_as_iso_string() {
        let date = VisitDate::parse("2025-01-05").expect("valid date");
        let json = serde_json::to_value(date).expect("serialise");
        assert_eq!(json, serde_json::json!("2025-01-05"));
    }
}
