//! Builders wiring domain services to the configured adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use guestbook::domain::ports::{
    FixtureAdminAuthenticator, FixtureAdminDirectory, GuestStore, ReportRenderer,
};
use guestbook::domain::{AdminAccountService, GuestService, ReportSettings};
use guestbook::inbound::http::state::{HttpState, HttpStatePorts};
use guestbook::outbound::export::default_renderers;
use guestbook::outbound::memory::InMemoryGuestStore;
use guestbook::outbound::supabase::{
    SupabaseAdminAuthenticator, SupabaseAdminDirectory, SupabaseClient, SupabaseConfig,
    SupabaseGuestStore, SupabaseKey,
};
use guestbook::settings::StoreSettings;

use super::ServerConfig;

fn guest_service<S>(
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    report: ReportSettings,
    renderers: Vec<Arc<dyn ReportRenderer>>,
) -> Arc<GuestService<S>> {
    let service = renderers
        .into_iter()
        .fold(GuestService::new(store, clock, report), GuestService::with_renderer);
    Arc::new(service)
}

fn guest_ports<S>(service: Arc<GuestService<S>>, base: HttpStatePorts) -> HttpStatePorts
where
    S: GuestStore + 'static,
{
    HttpStatePorts {
        guests: service.clone(),
        guests_query: service,
        ..base
    }
}

fn supabase_client(store: &StoreSettings) -> std::io::Result<Arc<SupabaseClient>> {
    let anon_key = SupabaseKey::new(store.anon_key.as_str());
    let service_role_key = store.service_role_key.as_deref().map(SupabaseKey::new);
    info!(
        store_url = %store.base_url,
        anon_key = %anon_key.fingerprint(),
        service_role_key = service_role_key.as_ref().map(SupabaseKey::fingerprint).as_deref(),
        "using hosted guest store"
    );
    if service_role_key.is_none() {
        warn!("no service role key configured; admin account updates will fail");
    }
    let client = SupabaseClient::new(SupabaseConfig {
        base_url: store.base_url.clone(),
        anon_key,
        service_role_key,
        timeout: store.timeout,
    })
    .map_err(|err| std::io::Error::other(format!("store client construction failed: {err}")))?;
    Ok(Arc::new(client))
}

/// Build HTTP state from the hosted store when configured, otherwise from an
/// in-memory store with fixture authentication.
///
/// # Errors
/// Returns [`std::io::Error`] when the store client cannot be constructed.
pub(super) fn build_http_state(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> std::io::Result<web::Data<HttpState>> {
    build_http_state_with(config, clock, default_renderers())
}

fn build_http_state_with(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
    renderers: Vec<Arc<dyn ReportRenderer>>,
) -> std::io::Result<web::Data<HttpState>> {
    let report = config.report.clone();
    let ports = match &config.store {
        Some(store) => {
            let client = supabase_client(store)?;
            let service = guest_service(
                Arc::new(SupabaseGuestStore::new(client.clone())),
                clock,
                report,
                renderers,
            );
            guest_ports(
                service,
                HttpStatePorts {
                    admin: Arc::new(AdminAccountService::new(Arc::new(
                        SupabaseAdminDirectory::new(client.clone()),
                    ))),
                    authenticator: Arc::new(SupabaseAdminAuthenticator::new(client)),
                    ..HttpStatePorts::default()
                },
            )
        }
        None => {
            warn!("no store URL configured; records are kept in memory and admin login is disabled");
            let store = Arc::new(InMemoryGuestStore::new(clock.clone()));
            let service = guest_service(store, clock, report, renderers);
            guest_ports(
                service,
                HttpStatePorts {
                    admin: Arc::new(AdminAccountService::new(Arc::new(FixtureAdminDirectory))),
                    authenticator: Arc::new(FixtureAdminAuthenticator),
                    ..HttpStatePorts::default()
                },
            )
        }
    };
    Ok(web::Data::new(HttpState::new(ports)))
}

/// Default system clock for production wiring.
pub(super) fn system_clock() -> Arc<dyn Clock> {
    Arc::new(DefaultClock)
}
