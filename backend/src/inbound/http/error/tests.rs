//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn store_failure() -> Error {
    Error::internal("guest store error: relation \"guests\" does not exist")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"sql": "select * from guests"}))
}

#[fixture]
fn validation_failure() -> Error {
    Error::invalid_request("Validasi gagal")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"phone": "Nomor HP minimal 10 digit"}))
}

async fn render(error: &Error) -> (StatusCode, Option<String>, serde_json::Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, trace, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no token"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("stale"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("store down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_follows_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(store_failure: Error) {
    let (status, trace, body) = render(&store_failure).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace.as_deref(), Some(TRACE_ID));
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["error"], REDACTED_MESSAGE);
    assert_eq!(body["traceId"], TRACE_ID);
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_field_details(validation_failure: Error) {
    let (status, trace, body) = render(&validation_failure).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(trace.as_deref(), Some(TRACE_ID));
    assert_eq!(body["error"], "Validasi gagal");
    assert_eq!(body["details"]["phone"], "Nomor HP minimal 10 digit");
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_header() {
    let error = Error::not_found("Data tamu 7 tidak ditemukan");
    let (status, trace, body) = render(&error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(trace.is_none());
    assert!(body.get("traceId").is_none());
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), REDACTED_MESSAGE);
    assert!(err.details().is_none());
}
