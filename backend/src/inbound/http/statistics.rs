//! Dashboard statistics endpoint.

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, GuestStatistics};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_period;

/// Period selection; `all` or absent means unconstrained.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatisticsParams {
    /// Month `1`-`12`.
    pub month: Option<String>,
    /// Four-digit year.
    pub year: Option<String>,
}

/// Counters and chart series for the admin dashboard.
#[utoipa::path(
    get,
    path = "/api/statistics",
    params(StatisticsParams),
    responses(
        (status = 200, description = "Statistics snapshot", body = GuestStatistics),
        (status = 400, description = "Invalid period", body = Error),
        (status = 401, description = "Missing or rejected token", body = Error),
        (status = 500, description = "Store error", body = Error)
    ),
    tags = ["statistics"],
    operation_id = "getStatistics"
)]
#[get("/statistics")]
pub async fn get_statistics(
    _admin: AdminContext,
    state: web::Data<HttpState>,
    query: web::Query<StatisticsParams>,
) -> ApiResult<web::Json<GuestStatistics>> {
    let period = parse_period(query.month.as_deref(), query.year.as_deref())?;
    let statistics = state.guests_query.statistics(period).await?;
    Ok(web::Json(statistics))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::NaiveDate;
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::MockGuestQuery;
    use crate::domain::{StatisticsPeriod, compute_statistics};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{admin_auth, test_app, test_ports};

    #[rstest]
    #[actix_web::test]
    async fn period_reaches_the_query_port() {
        let mut query = MockGuestQuery::new();
        query
            .expect_statistics()
            .withf(|period| {
                *period
                    == StatisticsPeriod {
                        month: Some(3),
                        year: Some(2025),
                    }
            })
            .times(1)
            .returning(|period| {
                let today = NaiveDate::from_ymd_opt(2025, 3, 12).expect("valid date");
                Ok(compute_statistics(&[], today, period))
            });
        let app = actix_test::init_service(test_app(HttpStatePorts {
            guests_query: Arc::new(query),
            ..test_ports()
        }))
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/api/statistics?month=3&year=2025")
            .insert_header(admin_auth())
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["total"], 0);
        assert_eq!(body["lastSevenDays"].as_array().map(Vec::len), Some(7));
        assert_eq!(body["monthlyBreakdown"].as_array().map(Vec::len), Some(12));
    }

    #[rstest]
    #[actix_web::test]
    async fn statistics_require_a_token() {
        let app = actix_test::init_service(test_app(test_ports())).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/statistics")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
