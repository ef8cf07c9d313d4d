//! Guest record endpoints.
//!
//! ```text
//! POST   /api/guests              public visitor form
//! GET    /api/guests?search&day&month&year&page
//! GET    /api/guests/{id}
//! PUT    /api/guests/{id}         or PUT /api/guests with `id` in the body
//! DELETE /api/guests/{id}         or DELETE /api/guests with `id` in the body
//! ```
//!
//! Everything except the visitor form requires an admin bearer token.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::ListGuestsRequest;
use crate::domain::{Error, GuestForm, GuestId, GuestRecord, GuestRecordPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminContext;
use crate::inbound::http::schemas::{GuestPageResponse, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FilterParams, parse_guest_id, parse_page};

pub(crate) const CREATED_MESSAGE: &str = "Data berhasil disimpan";
pub(crate) const DELETED_MESSAGE: &str = "Data berhasil dihapus";

/// Query string for `GET /api/guests`.
#[derive(Debug, Default, Deserialize)]
pub struct ListGuestsParams {
    #[serde(flatten)]
    pub filter: FilterParams,
    /// 1-indexed page; clamped into range.
    pub page: Option<String>,
}

/// Edit form body; `id` is required when the path carries none.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuestRequest {
    /// Record to update when calling `PUT /api/guests`.
    #[schema(value_type = Option<String>, example = "7")]
    #[serde(default)]
    pub id: Option<GuestId>,
    #[serde(flatten)]
    pub form: GuestForm,
}

/// Delete body for `DELETE /api/guests`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct DeleteGuestRequest {
    #[schema(value_type = Option<String>, example = "7")]
    #[serde(default)]
    pub id: Option<GuestId>,
}

fn path_id(raw: &str) -> Result<GuestId, Error> {
    GuestId::new(raw).map_err(|err| {
        Error::invalid_request("ID tamu tidak valid").with_details(json!({ "id": err.to_string() }))
    })
}

/// Path id wins; a body id that disagrees with it is rejected.
fn resolve_id(path: Option<&str>, body: Option<GuestId>) -> Result<GuestId, Error> {
    let Some(raw) = path else {
        return parse_guest_id(body);
    };
    let id = path_id(raw)?;
    match body {
        Some(other) if other != id => Err(Error::invalid_request("ID tamu tidak cocok")
            .with_details(json!({ "id": format!("ID body {other} berbeda dengan ID path {id}.") }))),
        _ => Ok(id),
    }
}

/// Record a visit from the public form.
#[utoipa::path(
    post,
    path = "/api/guests",
    request_body = GuestForm,
    responses(
        (status = 200, description = "Guest recorded", body = MessageResponse),
        (status = 400, description = "Validation failed", body = Error),
        (status = 500, description = "Store error", body = Error),
        (status = 503, description = "Store unreachable", body = Error)
    ),
    tags = ["guests"],
    operation_id = "createGuest",
    security([])
)]
#[post("/guests")]
pub async fn create_guest(
    state: web::Data<HttpState>,
    payload: web::Json<GuestForm>,
) -> ApiResult<web::Json<MessageResponse>> {
    let record = state.guests.create_guest(payload.into_inner()).await?;
    info!(guest_id = %record.id(), "guest recorded");
    Ok(web::Json(MessageResponse::new(CREATED_MESSAGE)))
}

/// List one page of filtered guest records.
#[utoipa::path(
    get,
    path = "/api/guests",
    params(
        FilterParams,
        ("page" = Option<String>, Query, description = "1-indexed page, clamped into range")
    ),
    responses(
        (status = 200, description = "Filtered page", body = GuestPageResponse),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 401, description = "Missing or rejected token", body = Error),
        (status = 500, description = "Store error", body = Error)
    ),
    tags = ["guests"],
    operation_id = "listGuests"
)]
#[get("/guests")]
pub async fn list_guests(
    _admin: AdminContext,
    state: web::Data<HttpState>,
    query: web::Query<ListGuestsParams>,
) -> ApiResult<web::Json<GuestPageResponse>> {
    let params = query.into_inner();
    let request = ListGuestsRequest {
        filter: params.filter.to_filter()?,
        page: parse_page(params.page.as_deref())?,
    };
    let response = state.guests_query.list_guests(request).await?;
    Ok(web::Json(GuestPageResponse::new(
        response.page,
        response.years,
    )))
}

/// Fetch one record.
#[utoipa::path(
    get,
    path = "/api/guests/{id}",
    params(("id" = String, Path, description = "Guest record id")),
    responses(
        (status = 200, description = "Guest record", body = GuestRecordPayload),
        (status = 401, description = "Missing or rejected token", body = Error),
        (status = 404, description = "No such record", body = Error)
    ),
    tags = ["guests"],
    operation_id = "getGuest"
)]
#[get("/guests/{id}")]
pub async fn get_guest(
    _admin: AdminContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<GuestRecord>> {
    let id = path_id(&path)?;
    let record = state.guests_query.get_guest(id).await?;
    Ok(web::Json(record))
}

async fn apply_update(
    state: &HttpState,
    path: Option<&str>,
    payload: UpdateGuestRequest,
) -> ApiResult<web::Json<GuestRecord>> {
    let UpdateGuestRequest { id, form } = payload;
    let id = resolve_id(path, id)?;
    let record = state.guests.update_guest(id, form).await?;
    info!(guest_id = %record.id(), "guest updated");
    Ok(web::Json(record))
}

/// Update the record named in the body.
#[utoipa::path(
    put,
    path = "/api/guests",
    request_body = UpdateGuestRequest,
    responses(
        (status = 200, description = "Updated record", body = GuestRecordPayload),
        (status = 400, description = "Validation failed or id missing", body = Error),
        (status = 401, description = "Missing or rejected token", body = Error),
        (status = 404, description = "No such record", body = Error),
        (status = 500, description = "Store error", body = Error)
    ),
    tags = ["guests"],
    operation_id = "updateGuest"
)]
#[put("/guests")]
pub async fn update_guest(
    _admin: AdminContext,
    state: web::Data<HttpState>,
    payload: web::Json<UpdateGuestRequest>,
) -> ApiResult<web::Json<GuestRecord>> {
    apply_update(&state, None, payload.into_inner()).await
}

/// Update the record named in the path.
#[utoipa::path(
    put,
    path = "/api/guests/{id}",
    params(("id" = String, Path, description = "Guest record id")),
    request_body = UpdateGuestRequest,
    responses(
        (status = 200, description = "Updated record", body = GuestRecordPayload),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Missing or rejected token", body = Error),
        (status = 404, description = "No such record", body = Error),
        (status = 500, description = "Store error", body = Error)
    ),
    tags = ["guests"],
    operation_id = "updateGuestById"
)]
#[put("/guests/{id}")]
pub async fn update_guest_by_id(
    _admin: AdminContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateGuestRequest>,
) -> ApiResult<web::Json<GuestRecord>> {
    apply_update(&state, Some(path.as_str()), payload.into_inner()).await
}

async fn apply_delete(state: &HttpState, id: GuestId) -> ApiResult<web::Json<MessageResponse>> {
    state.guests.delete_guest(id.clone()).await?;
    info!(guest_id = %id, "guest deleted");
    Ok(web::Json(MessageResponse::new(DELETED_MESSAGE)))
}

/// Delete the record named in the body.
#[utoipa::path(
    delete,
    path = "/api/guests",
    request_body = DeleteGuestRequest,
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 400, description = "Id missing", body = Error),
        (status = 401, description = "Missing or rejected token", body = Error),
        (status = 404, description = "No such record", body = Error),
        (status = 500, description = "Store error", body = Error)
    ),
    tags = ["guests"],
    operation_id = "deleteGuest"
)]
#[delete("/guests")]
pub async fn delete_guest(
    _admin: AdminContext,
    state: web::Data<HttpState>,
    payload: web::Json<DeleteGuestRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_guest_id(payload.into_inner().id)?;
    apply_delete(&state, id).await
}

/// Delete the record named in the path.
#[utoipa::path(
    delete,
    path = "/api/guests/{id}",
    params(("id" = String, Path, description = "Guest record id")),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 401, description = "Missing or rejected token", body = Error),
        (status = 404, description = "No such record", body = Error),
        (status = 500, description = "Store error", body = Error)
    ),
    tags = ["guests"],
    operation_id = "deleteGuestById"
)]
#[delete("/guests/{id}")]
pub async fn delete_guest_by_id(
    _admin: AdminContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = path_id(&path)?;
    apply_delete(&state, id).await
}

#[cfg(test)]
#[path = "guests_tests.rs"]
mod tests;
