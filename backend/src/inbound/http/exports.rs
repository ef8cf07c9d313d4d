//! Export download endpoint.
//!
//! ```text
//! GET /api/guests/export?format=csv|xlsx|pdf&search&day&month&year
//! ```
//!
//! Exports cover every filtered record, not just the visible page. Mount this
//! service before `/guests/{id}` so `export` is not read as an id.

use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::ports::ExportGuestsRequest;
use crate::domain::{Error, ExportFormat};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::FilterParams;

/// Query string for the export download.
#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    /// `csv`, `xlsx` (or `excel`) or `pdf`.
    pub format: Option<String>,
    #[serde(flatten)]
    pub filter: FilterParams,
}

fn parse_format(raw: Option<&str>) -> Result<ExportFormat, Error> {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty()).ok_or_else(|| {
        Error::invalid_request("Format ekspor wajib diisi")
            .with_details(json!({ "format": "Pilih csv, xlsx atau pdf." }))
    })?;
    raw.parse::<ExportFormat>().map_err(|err| {
        Error::invalid_request("Format ekspor tidak didukung")
            .with_details(json!({ "format": err.to_string() }))
    })
}

/// Download the filtered guest list as a file.
#[utoipa::path(
    get,
    path = "/api/guests/export",
    params(
        ("format" = String, Query, description = "csv, xlsx or pdf"),
        FilterParams
    ),
    responses(
        (status = 200, description = "Export attachment", content_type = "application/octet-stream"),
        (status = 400, description = "Unknown format or invalid filter", body = Error),
        (status = 401, description = "Missing or rejected token", body = Error),
        (status = 500, description = "Store or rendering error", body = Error)
    ),
    tags = ["guests"],
    operation_id = "exportGuests"
)]
#[get("/guests/export")]
pub async fn export_guests(
    _admin: AdminContext,
    state: web::Data<HttpState>,
    query: web::Query<ExportParams>,
) -> ApiResult<HttpResponse> {
    let params = query.into_inner();
    let request = ExportGuestsRequest {
        format: parse_format(params.format.as_deref())?,
        filter: params.filter.to_filter()?,
    };
    let artifact = state.guests_query.export_guests(request).await?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, artifact.content_type))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(artifact.filename)],
        })
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(artifact.bytes))
}
