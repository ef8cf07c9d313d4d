//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on driving ports,
//! so they stay testable without a store or auth service.

use std::sync::Arc;

use crate::domain::AdminAccountService;
use crate::domain::ports::{
    AdminAccountCommand, AdminAuthenticator, FixtureAdminAuthenticator, FixtureAdminDirectory,
    FixtureGuestCommand, FixtureGuestQuery, GuestCommand, GuestQuery,
};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub guests: Arc<dyn GuestCommand>,
    pub guests_query: Arc<dyn GuestQuery>,
    pub admin: Arc<dyn AdminAccountCommand>,
    pub authenticator: Arc<dyn AdminAuthenticator>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            guests: Arc::new(FixtureGuestCommand),
            guests_query: Arc::new(FixtureGuestQuery),
            admin: Arc::new(AdminAccountService::new(Arc::new(FixtureAdminDirectory))),
            authenticator: Arc::new(FixtureAdminAuthenticator),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub guests: Arc<dyn GuestCommand>,
    pub guests_query: Arc<dyn GuestQuery>,
    pub admin: Arc<dyn AdminAccountCommand>,
    pub authenticator: Arc<dyn AdminAuthenticator>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use guestbook::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts::default());
    /// let _query = state.guests_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            guests,
            guests_query,
            admin,
            authenticator,
        } = ports;
        Self {
            guests,
            guests_query,
            admin,
            authenticator,
        }
    }
}
