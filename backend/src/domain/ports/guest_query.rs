//! Driving ports for guest listings, exports and statistics.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{
    Error, ExportArtifact, ExportFormat, GuestFilter, GuestId, GuestRecord, GuestStatistics,
    StatisticsPeriod,
};

/// Request for one page of the filtered guest list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListGuestsRequest {
    /// Search term and calendar filters.
    pub filter: GuestFilter,
    /// Requested 1-indexed page; clamped by the service.
    pub page: usize,
}

/// One page of the filtered guest list plus filter dropdown data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListGuestsResponse {
    /// Records on the requested page.
    pub page: Page<GuestRecord>,
    /// Distinct visit years across all records, newest first.
    pub years: Vec<i32>,
}

/// Request to export the filtered guest list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportGuestsRequest {
    /// Search term and calendar filters.
    pub filter: GuestFilter,
    /// Output format.
    pub format: ExportFormat,
}

/// Driving port for guest read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestQuery: Send + Sync {
    /// Filter every record and return the requested page.
    async fn list_guests(&self, request: ListGuestsRequest) -> Result<ListGuestsResponse, Error>;

    /// Fetch one record.
    async fn get_guest(&self, id: GuestId) -> Result<GuestRecord, Error>;

    /// Render every filtered record (not only the visible page).
    async fn export_guests(&self, request: ExportGuestsRequest) -> Result<ExportArtifact, Error>;

    /// Dashboard counters and chart series.
    async fn statistics(&self, period: StatisticsPeriod) -> Result<GuestStatistics, Error>;
}

/// Fixture query over an empty guest list.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGuestQuery;

#[async_trait]
impl GuestQuery for FixtureGuestQuery {
    async fn list_guests(&self, request: ListGuestsRequest) -> Result<ListGuestsResponse, Error> {
        Ok(ListGuestsResponse {
            page: pagination::paginate(&[], pagination::PageSize::default(), request.page),
            years: Vec::new(),
        })
    }

    async fn get_guest(&self, id: GuestId) -> Result<GuestRecord, Error> {
        Err(Error::not_found(format!("Data tamu {id} tidak ditemukan")))
    }

    async fn export_guests(&self, _request: ExportGuestsRequest) -> Result<ExportArtifact, Error> {
        Err(Error::service_unavailable("export is not configured"))
    }

    async fn statistics(&self, period: StatisticsPeriod) -> Result<GuestStatistics, Error> {
        let today = chrono::NaiveDate::default();
        Ok(crate::domain::compute_statistics(&[], today, period))
    }
}
