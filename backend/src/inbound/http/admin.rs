//! Admin account settings endpoint.

use actix_web::{post, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{AdminProfileUpdate, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminContext;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;

pub(crate) const UPDATED_MESSAGE: &str = "Data admin berhasil diperbarui";

/// Settings form for the signed-in admin. A blank password leaves it unchanged.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    #[schema(example = "Admin Desa")]
    #[serde(default)]
    pub name: String,
    #[schema(example = "admin@desa.id")]
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub new_password: Option<String>,
}

impl std::fmt::Debug for UpdateAdminRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateAdminRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("new_password", &self.new_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Change the signed-in admin's name, email and optionally password.
#[utoipa::path(
    post,
    path = "/api/admin/update",
    request_body = UpdateAdminRequest,
    responses(
        (status = 200, description = "Account updated", body = MessageResponse),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Missing or rejected token", body = Error),
        (status = 404, description = "Account not found", body = Error),
        (status = 403, description = "Store refused the admin operation", body = Error),
        (status = 409, description = "Email already used by another account", body = Error),
        (status = 503, description = "Auth service unreachable", body = Error),
        (status = 500, description = "Auth service error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "updateAdmin"
)]
#[post("/admin/update")]
pub async fn update_admin(
    admin: AdminContext,
    state: web::Data<HttpState>,
    payload: web::Json<UpdateAdminRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let UpdateAdminRequest {
        name,
        email,
        new_password,
    } = payload.into_inner();
    let update = AdminProfileUpdate::new(name, email, new_password)?;
    let caller = admin.into_identity();
    info!(admin_id = caller.id(), "admin settings update requested");
    state.admin.update_profile(caller, update).await?;
    Ok(web::Json(MessageResponse::new(UPDATED_MESSAGE)))
}
