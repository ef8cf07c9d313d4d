//! Domain primitives, services and ports for the guestbook.
//!
//! Purpose: define the guest record and its validation rules, the pure
//! filter/statistics/export shaping over the record list, and the services
//! that drive the store through ports. Nothing here knows about HTTP or the
//! hosted store's wire format.
//!
//! Public surface:
//! - `GuestRecord`, `GuestForm`, `GuestId`: the sole entity and its inputs.
//! - `GuestFilter`: search and day/month/year filtering.
//! - `ExportReport`, `ExportFormat`: format-agnostic export shaping.
//! - `GuestStatistics`: dashboard counters and chart series.
//! - `GuestService`, `AdminAccountService`: port implementations.
//! - `dashboard`: reducer-driven dashboard state and dialog controllers.
//! - `Error`, `ErrorCode`: API error payload.

pub mod admin;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod filter;
pub mod guest;
pub mod guest_service;
pub mod ports;
pub mod statistics;
pub mod trace_id;
pub mod visit_date;

pub use self::admin::{
    ADMIN_NAME_MIN, AdminAccountService, AdminIdentity, AdminProfileUpdate, PASSWORD_MIN,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::export::{
    EXPORT_COLUMNS, ExportArtifact, ExportFormat, ExportReport, ExportRow, FilterSummaryEntry,
    MISSING_PHONE, ReportSettings, UnknownExportFormat, export_filename, filter_summary,
};
pub use self::filter::{ALL, GuestFilter, GuestFilterError, distinct_years};
pub use self::guest::{
    ADDRESS_MIN, FULL_NAME_MIN, GuestField, GuestForm, GuestId, GuestIdError, GuestRecord,
    GuestRecordPayload, GuestSubmission, GuestValidationError, GuestValidationErrors, PHONE_MAX,
    PHONE_MIN, PURPOSE_MIN,
};
pub use self::guest_service::GuestService;
pub use self::statistics::{
    DAILY_WINDOW, DailyCount, GuestStatistics, MONTHLY_WINDOW, MonthlyCount, PurposeCategory,
    PurposeCount, PurposeShare, StatisticsPeriod, compute_statistics,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::visit_date::{MONTH_NAMES, VisitDate, VisitDateError, long_form, month_name};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use guestbook::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
