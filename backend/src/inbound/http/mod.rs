//! HTTP inbound adapter exposing the guestbook REST API.

pub mod admin;
pub mod auth;
pub mod error;
pub mod exports;
pub mod guests;
pub mod health;
pub mod schemas;
pub mod state;
pub mod statistics;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api` route and the JSON/query error handlers.
///
/// The export download is registered ahead of `/guests/{id}`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use guestbook::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .service(exports::export_guests)
        .service(guests::create_guest)
        .service(guests::list_guests)
        .service(guests::update_guest)
        .service(guests::delete_guest)
        .service(guests::get_guest)
        .service(guests::update_guest_by_id)
        .service(guests::delete_guest_by_id)
        .service(statistics::get_statistics)
        .service(admin::update_admin);
}
