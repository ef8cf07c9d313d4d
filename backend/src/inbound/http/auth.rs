//! Bearer-token authentication for admin endpoints.
//!
//! Handlers take an [`AdminContext`] argument to require a signed-in admin.
//! The token is checked against the auth service on every request; nothing is
//! cached between requests.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::AdminAuthError;
use crate::domain::{AdminIdentity, Error};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from `Authorization: Bearer <token>`.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<String, Error> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Unauthorized"))?;
    let value = value
        .to_str()
        .map_err(|_| Error::unauthorized("Authorization header is not valid text"))?;
    let token = value
        .get(..BEARER_PREFIX.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(BEARER_PREFIX))
        .and_then(|_| value.get(BEARER_PREFIX.len()..))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("Authorization must be a bearer token"))?;
    Ok(token.to_owned())
}

fn map_auth_error(error: AdminAuthError) -> Error {
    match error {
        AdminAuthError::InvalidToken { message } => {
            tracing::debug!(%message, "bearer token rejected");
            Error::unauthorized("Unauthorized")
        }
        AdminAuthError::Connection { message } => {
            Error::service_unavailable(format!("auth service unavailable: {message}"))
        }
    }
}

/// Authenticated admin making the current request.
#[derive(Debug, Clone)]
pub struct AdminContext(AdminIdentity);

impl AdminContext {
    /// Identity reported by the auth service.
    pub fn identity(&self) -> &AdminIdentity {
        &self.0
    }

    /// Take ownership of the identity.
    pub fn into_identity(self) -> AdminIdentity {
        self.0
    }
}

impl FromRequest for AdminContext {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req.headers());
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let token = token?;
            let identity = state
                .authenticator
                .verify(&token)
                .await
                .map_err(map_auth_error)?;
            Ok(Self(identity))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, get};
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockAdminAuthenticator;
    use crate::inbound::http::state::HttpStatePorts;

    #[get("/whoami")]
    async fn whoami(admin: AdminContext) -> HttpResponse {
        HttpResponse::Ok().body(admin.identity().email().to_owned())
    }

    fn state_with(authenticator: MockAdminAuthenticator) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            authenticator: Arc::new(authenticator),
            ..HttpStatePorts::default()
        }))
    }

    #[rstest]
    #[case(None, "Unauthorized")]
    #[case(Some("Basic YWRtaW46cGFzcw=="), "Authorization must be a bearer token")]
    #[case(Some("Bearer    "), "Authorization must be a bearer token")]
    fn malformed_headers_are_unauthorized(#[case] header: Option<&str>, #[case] message: &str) {
        let mut request = actix_test::TestRequest::default();
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let error = bearer_token(request.to_http_request().headers()).expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), message);
    }

    #[rstest]
    fn scheme_is_case_insensitive() {
        let request = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "bearer abc.def"))
            .to_http_request();
        assert_eq!(bearer_token(request.headers()).as_deref(), Ok("abc.def"));
    }

    #[rstest]
    #[actix_web::test]
    async fn verified_token_reaches_handler() {
        let mut authenticator = MockAdminAuthenticator::new();
        authenticator
            .expect_verify()
            .withf(|token| token == "good-token")
            .times(1)
            .returning(|_| Ok(AdminIdentity::new("u-1", "admin@desa.id")));

        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(authenticator))
                .service(whoami),
        )
        .await;
        let request = actix_test::TestRequest::get()
            .uri("/whoami")
            .insert_header((AUTHORIZATION, "Bearer good-token"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(response).await, "admin@desa.id");
    }

    #[rstest]
    #[case(AdminAuthError::invalid_token("expired"), StatusCode::UNAUTHORIZED)]
    #[case(AdminAuthError::connection("timeout"), StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn rejected_tokens_map_to_status(
        #[case] failure: AdminAuthError,
        #[case] expected: StatusCode,
    ) {
        let mut authenticator = MockAdminAuthenticator::new();
        authenticator
            .expect_verify()
            .times(1)
            .returning(move |_| Err(failure.clone()));

        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(authenticator))
                .service(whoami),
        )
        .await;
        let request = actix_test::TestRequest::get()
            .uri("/whoami")
            .insert_header((AUTHORIZATION, "Bearer some-token"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), expected);
    }
}
