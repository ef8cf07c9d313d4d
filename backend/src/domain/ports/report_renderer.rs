//! Driven port for turning an export report into file bytes.

use crate::domain::{ExportFormat, ExportReport};

use super::define_port_error;

define_port_error! {
    /// Errors raised while rendering a report.
    pub enum ReportRenderError {
        /// The encoder failed; no partial artifact is returned.
        Encoding { message: String } =>
            "report encoding failed: {message}",
    }
}

/// Port for format-specific report encoders.
///
/// Rendering is synchronous and CPU bound; callers move it off the async
/// executor.
#[cfg_attr(test, mockall::automock)]
pub trait ReportRenderer: Send + Sync {
    /// Format produced by this renderer.
    fn format(&self) -> ExportFormat;

    /// Encode `report` completely or fail without output.
    fn render(&self, report: &ExportReport) -> Result<Vec<u8>, ReportRenderError>;
}
