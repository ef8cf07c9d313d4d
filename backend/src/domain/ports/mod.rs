//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod admin;
mod guest_command;
mod guest_query;
mod guest_store;
mod report_renderer;

#[cfg(test)]
pub use admin::{MockAdminAccountCommand, MockAdminAuthenticator, MockAdminDirectory};
pub use admin::{
    AdminAccountCommand, AdminAuthError, AdminAuthenticator, AdminDirectory, AdminDirectoryError,
    FixtureAdminAuthenticator, FixtureAdminDirectory,
};
#[cfg(test)]
pub use guest_command::MockGuestCommand;
pub use guest_command::{FixtureGuestCommand, GuestCommand};
#[cfg(test)]
pub use guest_query::MockGuestQuery;
pub use guest_query::{
    ExportGuestsRequest, FixtureGuestQuery, GuestQuery, ListGuestsRequest, ListGuestsResponse,
};
#[cfg(test)]
pub use guest_store::MockGuestStore;
pub use guest_store::{FixtureGuestStore, GuestStore, GuestStoreError};
#[cfg(test)]
pub use report_renderer::MockReportRenderer;
pub use report_renderer::{ReportRenderError, ReportRenderer};
