//! Request parsing shared by the guest endpoints.
//!
//! Query strings arrive as text; filter components and page numbers are
//! parsed here so handlers only see domain types. Body and query extractor
//! failures are rewritten into the JSON error envelope.

use actix_web::{HttpRequest, error::JsonPayloadError, error::QueryPayloadError, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::{Error, GuestFilter, GuestId, StatisticsPeriod};

/// Filter parameters shared by the list and export endpoints.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterParams {
    /// Case-insensitive search over name, address and purpose.
    pub search: Option<String>,
    /// Day of month, `1`-`31`, or `all`.
    pub day: Option<String>,
    /// Month, `1`-`12`, or `all`.
    pub month: Option<String>,
    /// Four-digit year, or `all`.
    pub year: Option<String>,
}

impl FilterParams {
    /// Parse into a domain filter.
    ///
    /// # Errors
    /// Returns an invalid-request error naming the offending component.
    pub fn to_filter(&self) -> Result<GuestFilter, Error> {
        let filter = GuestFilter::parse(
            self.search.as_deref().unwrap_or_default(),
            self.day.as_deref(),
            self.month.as_deref(),
            self.year.as_deref(),
        )?;
        Ok(filter)
    }
}

/// Parse a 1-indexed page number; absent or blank means the first page.
///
/// Out-of-range numbers are clamped later by the pager.
pub(crate) fn parse_page(raw: Option<&str>) -> Result<usize, Error> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(1),
        Some(value) => value.parse::<usize>().map_err(|_| {
            Error::invalid_request("Halaman tidak valid")
                .with_details(json!({ "page": "Halaman harus berupa angka." }))
        }),
    }
}

/// Parse a month/year pair for the statistics view.
pub(crate) fn parse_period(
    month: Option<&str>,
    year: Option<&str>,
) -> Result<StatisticsPeriod, Error> {
    let filter = GuestFilter::parse("", None, month, year)?;
    Ok(StatisticsPeriod {
        month: filter.month,
        year: filter.year,
    })
}

/// Parse an id from the path or the request body.
pub(crate) fn parse_guest_id(raw: Option<GuestId>) -> Result<GuestId, Error> {
    raw.ok_or_else(|| {
        Error::invalid_request("ID tamu wajib diisi").with_details(json!({ "id": "ID wajib diisi." }))
    })
}

/// JSON extractor settings that answer malformed bodies with the error
/// envelope instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        Error::invalid_request(format!("Body JSON tidak valid: {err}")).into()
    })
}

/// Query extractor settings mirroring [`json_config`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        Error::invalid_request(format!("Parameter query tidak valid: {err}")).into()
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(None, 1)]
    #[case(Some(""), 1)]
    #[case(Some(" 3 "), 3)]
    #[case(Some("0"), 0)]
    fn page_numbers_parse(#[case] raw: Option<&str>, #[case] expected: usize) {
        assert_eq!(parse_page(raw), Ok(expected));
    }

    #[rstest]
    #[case("dua")]
    #[case("-1")]
    fn non_numeric_pages_are_rejected(#[case] raw: &str) {
        let error = parse_page(Some(raw)).expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert!(error.details().and_then(|d| d.get("page")).is_some());
    }

    #[rstest]
    fn all_values_leave_filter_unconstrained() {
        let params = FilterParams {
            search: Some("budi".to_owned()),
            day: Some("all".to_owned()),
            month: Some("3".to_owned()),
            year: Some(String::new()),
        };
        let filter = params.to_filter().expect("valid filter");
        assert_eq!(filter.search, "budi");
        assert_eq!(filter.day, None);
        assert_eq!(filter.month, Some(3));
        assert_eq!(filter.year, None);
    }

    #[rstest]
    fn out_of_range_month_names_the_field() {
        let params = FilterParams {
            month: Some("13".to_owned()),
            ..FilterParams::default()
        };
        let error = params.to_filter().expect_err("rejected");
        assert!(error.details().and_then(|d| d.get("month")).is_some());
    }

    #[rstest]
    fn period_ignores_day_and_search() {
        let period = parse_period(Some("all"), Some("2025")).expect("valid period");
        assert_eq!(
            period,
            StatisticsPeriod {
                month: None,
                year: Some(2025)
            }
        );
    }

    #[rstest]
    fn missing_id_is_invalid_request() {
        let error = parse_guest_id(None).expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
