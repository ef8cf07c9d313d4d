//! Free-text search and calendar filters over guest records.
//!
//! Filtering is a pure, order-preserving recomputation over the full record
//! list. All active predicates combine with logical AND.

use std::collections::BTreeSet;

use serde_json::json;

use crate::domain::{Error, GuestRecord};

/// Query value meaning "no constraint" for a date component.
pub const ALL: &str = "all";

/// Errors raised when parsing filter values from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuestFilterError {
    /// Day outside `1..=31` or not a number.
    #[error("Hari harus berupa angka 1-31.")]
    InvalidDay,
    /// Month outside `1..=12` or not a number.
    #[error("Bulan harus berupa angka 1-12.")]
    InvalidMonth,
    /// Year not a four-digit number.
    #[error("Tahun harus berupa empat digit.")]
    InvalidYear,
}

impl GuestFilterError {
    fn field(&self) -> &'static str {
        match self {
            Self::InvalidDay => "day",
            Self::InvalidMonth => "month",
            Self::InvalidYear => "year",
        }
    }
}

impl From<GuestFilterError> for Error {
    fn from(value: GuestFilterError) -> Self {
        Error::invalid_request("Filter tidak valid")
            .with_details(json!({ value.field(): value.to_string() }))
    }
}

/// Active search term and calendar filters.
///
/// `None` means the component is unconstrained. Months are 1-indexed.
///
/// # Examples
/// ```
/// use guestbook::domain::GuestFilter;
///
/// let filter = GuestFilter::parse("budi", Some("all"), Some("3"), Some("2025"))
///     .expect("valid filter");
/// assert_eq!(filter.month, Some(3));
/// assert!(filter.day.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestFilter {
    /// Case-insensitive substring over name, address and purpose.
    pub search: String,
    /// Day of month, `1..=31`.
    pub day: Option<u32>,
    /// Month, `1..=12`.
    pub month: Option<u32>,
    /// Four-digit year.
    pub year: Option<i32>,
}

impl GuestFilter {
    /// Parse filter values as they arrive in a query string.
    ///
    /// Missing, empty or `"all"` components are unconstrained.
    ///
    /// # Errors
    /// Returns the first component that is present but out of range.
    pub fn parse(
        search: &str,
        day: Option<&str>,
        month: Option<&str>,
        year: Option<&str>,
    ) -> Result<Self, GuestFilterError> {
        Ok(Self {
            search: search.to_owned(),
            day: parse_component(day, 1..=31, GuestFilterError::InvalidDay)?,
            month: parse_component(month, 1..=12, GuestFilterError::InvalidMonth)?,
            year: parse_year(year)?,
        })
    }

    /// Whether any date component or search term is active.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || self.day.is_some()
            || self.month.is_some()
            || self.year.is_some()
    }

    /// Whether `record` satisfies every active predicate.
    pub fn matches(&self, record: &GuestRecord) -> bool {
        self.matches_search(record) && self.matches_date(record)
    }

    fn matches_search(&self, record: &GuestRecord) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [record.full_name(), record.address(), record.purpose()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_date(&self, record: &GuestRecord) -> bool {
        if self.day.is_none() && self.month.is_none() && self.year.is_none() {
            return true;
        }
        let Some(date) = record.visit_date() else {
            return false;
        };
        self.day.is_none_or(|day| date.day() == day)
            && self.month.is_none_or(|month| date.month() == month)
            && self.year.is_none_or(|year| date.year() == year)
    }

    /// Order-preserving subset of `records` matching this filter.
    pub fn apply<'a>(&self, records: &'a [GuestRecord]) -> Vec<&'a GuestRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }

    /// Owned copy of [`GuestFilter::apply`].
    pub fn apply_owned(&self, records: &[GuestRecord]) -> Vec<GuestRecord> {
        self.apply(records).into_iter().cloned().collect()
    }
}

fn is_unconstrained(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case(ALL))
}

fn parse_component(
    raw: Option<&str>,
    range: std::ops::RangeInclusive<u32>,
    error: GuestFilterError,
) -> Result<Option<u32>, GuestFilterError> {
    let Some(value) = is_unconstrained(raw) else {
        return Ok(None);
    };
    match value.parse::<u32>() {
        Ok(parsed) if range.contains(&parsed) => Ok(Some(parsed)),
        _ => Err(error),
    }
}

fn parse_year(raw: Option<&str>) -> Result<Option<i32>, GuestFilterError> {
    let Some(value) = is_unconstrained(raw) else {
        return Ok(None);
    };
    if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(GuestFilterError::InvalidYear);
    }
    value
        .parse::<i32>()
        .map(Some)
        .map_err(|_| GuestFilterError::InvalidYear)
}

/// Distinct visit years present in `records`, newest first.
pub fn distinct_years(records: &[GuestRecord]) -> Vec<i32> {
    let years: BTreeSet<i32> = records
        .iter()
        .filter_map(GuestRecord::visit_date)
        .map(|date| date.year())
        .collect();
    years.into_iter().rev().collect()
}
