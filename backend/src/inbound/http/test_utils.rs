//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::App;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::web;
use async_trait::async_trait;

use crate::domain::AdminIdentity;
use crate::domain::ports::{AdminAuthError, AdminAuthenticator};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Token accepted by [`StaticTokenAuthenticator`].
pub const ADMIN_TOKEN: &str = "test-admin-token";
/// Email of the admin behind [`ADMIN_TOKEN`].
pub const ADMIN_EMAIL: &str = "admin@desa.id";

/// Authenticator that accepts exactly [`ADMIN_TOKEN`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticTokenAuthenticator;

#[async_trait]
impl AdminAuthenticator for StaticTokenAuthenticator {
    async fn verify(&self, token: &str) -> Result<AdminIdentity, AdminAuthError> {
        if token == ADMIN_TOKEN {
            Ok(AdminIdentity::new("admin-1", ADMIN_EMAIL))
        } else {
            Err(AdminAuthError::invalid_token("unknown token"))
        }
    }
}

/// `Authorization` header pair carrying [`ADMIN_TOKEN`].
pub fn admin_auth() -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
}

/// Ports with the static authenticator and fixtures elsewhere.
pub fn test_ports() -> HttpStatePorts {
    HttpStatePorts {
        authenticator: Arc::new(StaticTokenAuthenticator),
        ..HttpStatePorts::default()
    }
}

/// App with every API route mounted under `/api`.
pub fn test_app(
    ports: HttpStatePorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(ports)))
        .service(web::scope("/api").configure(crate::inbound::http::configure_api))
}
