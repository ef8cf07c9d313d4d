//! Guest domain service implementing the command and query driving ports.
//!
//! The service owns the listing pipeline: fetch every record from the store,
//! filter in memory, then paginate, export or summarise the filtered subset.
//! Store failures are mapped here and never escape as adapter errors.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::FixedOffset;
use mockable::Clock;
use pagination::{PageSize, paginate};
use tracing::{info, warn};

use crate::domain::ports::{
    ExportGuestsRequest, GuestCommand, GuestQuery, GuestStore, GuestStoreError,
    ListGuestsRequest, ListGuestsResponse, ReportRenderError, ReportRenderer,
};
use crate::domain::{
    Error, ExportArtifact, ExportFormat, ExportReport, GuestForm, GuestId, GuestRecord,
    GuestStatistics, ReportSettings, StatisticsPeriod, TraceId, compute_statistics,
    distinct_years, export_filename,
};

fn map_store_error(error: GuestStoreError) -> Error {
    if !matches!(error, GuestStoreError::NotFound { .. }) {
        warn!(kind = error.kind(), %error, "guest store call failed");
    }
    match error {
        GuestStoreError::Connection { message } => {
            Error::service_unavailable(format!("guest store unavailable: {message}"))
        }
        GuestStoreError::Query { message } => {
            Error::internal(format!("guest store error: {message}"))
        }
        GuestStoreError::NotFound { id } => {
            Error::not_found(format!("Data tamu {id} tidak ditemukan"))
        }
    }
}

fn map_render_error(format: ExportFormat, error: &ReportRenderError) -> Error {
    Error::internal(format!("failed to render {format} export: {error}"))
}

/// Guest service over a record store, a clock and a set of report renderers.
#[derive(Clone)]
pub struct GuestService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    report: ReportSettings,
    renderers: Vec<Arc<dyn ReportRenderer>>,
    page_size: PageSize,
}

impl<S> GuestService<S> {
    /// Create a service with no renderers and the default page size.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, report: ReportSettings) -> Self {
        Self {
            store,
            clock,
            report,
            renderers: Vec::new(),
            page_size: PageSize::default(),
        }
    }

    /// Register a renderer; a later renderer for the same format wins.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn ReportRenderer>) -> Self {
        self.renderers.retain(|existing| existing.format() != renderer.format());
        self.renderers.push(renderer);
        self
    }

    fn renderer_for(&self, format: ExportFormat) -> Result<Arc<dyn ReportRenderer>, Error> {
        self.renderers
            .iter()
            .find(|renderer| renderer.format() == format)
            .cloned()
            .ok_or_else(|| Error::internal(format!("no renderer registered for {format}")))
    }

    fn offset(&self) -> FixedOffset {
        self.report.offset
    }
}

impl<S> GuestService<S>
where
    S: GuestStore,
{
    async fn all_records(&self) -> Result<Vec<GuestRecord>, Error> {
        self.store.list_all().await.map_err(map_store_error)
    }
}

#[async_trait]
impl<S> GuestCommand for GuestService<S>
where
    S: GuestStore,
{
    async fn create_guest(&self, form: GuestForm) -> Result<GuestRecord, Error> {
        let submission = form.validate()?;
        let record = self
            .store
            .insert(&submission)
            .await
            .map_err(map_store_error)?;
        info!(guest_id = %record.id(), "guest record created");
        Ok(record)
    }

    async fn update_guest(&self, id: GuestId, form: GuestForm) -> Result<GuestRecord, Error> {
        let submission = form.validate()?;
        let record = self
            .store
            .update_by_id(&id, &submission)
            .await
            .map_err(map_store_error)?;
        info!(guest_id = %id, "guest record updated");
        Ok(record)
    }

    async fn delete_guest(&self, id: GuestId) -> Result<(), Error> {
        self.store
            .delete_by_id(&id)
            .await
            .map_err(map_store_error)?;
        info!(guest_id = %id, "guest record deleted");
        Ok(())
    }
}

#[async_trait]
impl<S> GuestQuery for GuestService<S>
where
    S: GuestStore,
{
    async fn list_guests(&self, request: ListGuestsRequest) -> Result<ListGuestsResponse, Error> {
        let records = self.all_records().await?;
        let filtered = request.filter.apply_owned(&records);
        Ok(ListGuestsResponse {
            page: paginate(&filtered, self.page_size, request.page),
            years: distinct_years(&records),
        })
    }

    async fn get_guest(&self, id: GuestId) -> Result<GuestRecord, Error> {
        self.store
            .find_by_id(&id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("Data tamu {id} tidak ditemukan")))
    }

    async fn export_guests(&self, request: ExportGuestsRequest) -> Result<ExportArtifact, Error> {
        let renderer = self.renderer_for(request.format)?;
        let records = self.all_records().await?;
        let filtered = request.filter.apply(&records);
        let report = ExportReport::build(&filtered, &request.filter, &self.report, self.clock.utc());
        let filename = export_filename(request.format, report.export_date());
        let row_count = report.rows().len();

        let format = request.format;
        let bytes = TraceId::spawn_blocking(move || renderer.render(&report))
            .await
            .map_err(|err| Error::internal(format!("export task failed: {err}")))?
            .map_err(|err| {
                warn!(%format, error = %err, "export rendering failed");
                map_render_error(format, &err)
            })?;

        info!(%format, rows = row_count, bytes = bytes.len(), "guest export rendered");
        Ok(ExportArtifact {
            filename,
            content_type: format.content_type(),
            bytes,
        })
    }

    async fn statistics(&self, period: StatisticsPeriod) -> Result<GuestStatistics, Error> {
        let records = self.all_records().await?;
        let today = self.clock.utc().with_timezone(&self.offset()).date_naive();
        Ok(compute_statistics(&records, today, period))
    }
}

#[cfg(test)]
#[path = "guest_service_tests.rs"]
mod tests;
