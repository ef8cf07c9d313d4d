//! HTTP server configuration derived from [`GuestbookSettings`].

use std::net::SocketAddr;

use guestbook::domain::ReportSettings;
use guestbook::settings::{GuestbookSettings, SettingsError, StoreSettings};

/// Validated inputs for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Option<StoreSettings>,
    pub(crate) report: ReportSettings,
}

impl ServerConfig {
    /// In-memory configuration listening on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, report: ReportSettings) -> Self {
        Self {
            bind_addr,
            store: None,
            report,
        }
    }

    /// Validate loaded settings into a server configuration.
    ///
    /// # Errors
    /// Returns the first [`SettingsError`] found.
    pub fn from_settings(settings: &GuestbookSettings) -> Result<Self, SettingsError> {
        let config = Self::new(settings.bind_addr()?, settings.report()?);
        Ok(match settings.store()? {
            Some(store) => config.with_store(store),
            None => config,
        })
    }

    /// Use the hosted store instead of the in-memory one.
    #[must_use]
    pub fn with_store(mut self, store: StoreSettings) -> Self {
        self.store = Some(store);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
