//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every inbound handler and the payload schemas they
//! reference. Admin endpoints authenticate with a bearer token issued by the
//! hosted auth service; guest submission and the health probes opt out.
//!
//! The document is served by Swagger UI in debug builds and printed by
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    DailyCount, Error, ErrorCode, ExportFormat, GuestForm, GuestRecordPayload, GuestStatistics,
    MonthlyCount, PurposeCategory, PurposeCount, PurposeShare,
};
use crate::inbound::http::admin::UpdateAdminRequest;
use crate::inbound::http::guests::{DeleteGuestRequest, UpdateGuestRequest};
use crate::inbound::http::schemas::{GuestPageResponse, MessageResponse};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "AdminBearer";

/// Registers the admin bearer token scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token of a signed-in admin."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the guestbook REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Buku Tamu Digital API",
        description = "Guest submission, admin record management, exports and statistics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("AdminBearer" = [])),
    paths(
        crate::inbound::http::guests::create_guest,
        crate::inbound::http::guests::list_guests,
        crate::inbound::http::guests::get_guest,
        crate::inbound::http::guests::update_guest,
        crate::inbound::http::guests::update_guest_by_id,
        crate::inbound::http::guests::delete_guest,
        crate::inbound::http::guests::delete_guest_by_id,
        crate::inbound::http::exports::export_guests,
        crate::inbound::http::statistics::get_statistics,
        crate::inbound::http::admin::update_admin,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        GuestForm,
        GuestRecordPayload,
        GuestPageResponse,
        UpdateGuestRequest,
        DeleteGuestRequest,
        MessageResponse,
        ExportFormat,
        GuestStatistics,
        DailyCount,
        MonthlyCount,
        PurposeCategory,
        PurposeCount,
        PurposeShare,
        UpdateAdminRequest,
    )),
    tags(
        (name = "guests", description = "Guest records and exports"),
        (name = "statistics", description = "Dashboard counters and charts"),
        (name = "admin", description = "Admin account settings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected an inline object schema for {name}"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "error", "traceId", "details"])]
    #[case("GuestForm", &["fullName", "address", "phone", "purpose", "visitDate"])]
    #[case("GuestPageResponse", &["items", "page", "pageCount", "total", "years"])]
    #[case("UpdateAdminRequest", &["name", "email", "newPassword"])]
    fn schemas_use_wire_field_names(#[case] name: &str, #[case] expected: &[&str]) {
        let fields = schema_fields(name);
        for field in expected {
            assert!(fields.iter().any(|f| f == field), "{name} lacks {field}: {fields:?}");
        }
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(matches!(
            components.security_schemes.get(BEARER_SCHEME),
            Some(SecurityScheme::Http(_))
        ));
    }

    #[rstest]
    #[case("/api/guests")]
    #[case("/api/guests/{id}")]
    #[case("/api/guests/export")]
    #[case("/api/statistics")]
    #[case("/api/admin/update")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} missing");
    }
}
