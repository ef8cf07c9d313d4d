//! CSV renderer: UTF-8 BOM, every field quoted, `\n` terminated.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::{DateStyle, table};
use crate::domain::ports::{ReportRenderError, ReportRenderer};
use crate::domain::{EXPORT_COLUMNS, ExportFormat, ExportReport};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Renders the report as a spreadsheet-friendly CSV file.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvRenderer;

impl ReportRenderer for CsvRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn render(&self, report: &ExportReport) -> Result<Vec<u8>, ReportRenderError> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(UTF8_BOM.to_vec());

        writer.write_record(EXPORT_COLUMNS).map_err(encoding_error)?;
        for row in table(report, DateStyle::Iso) {
            writer.write_record(&row).map_err(encoding_error)?;
        }
        writer
            .into_inner()
            .map_err(|err| ReportRenderError::encoding(err.to_string()))
    }
}

fn encoding_error(error: csv::Error) -> ReportRenderError {
    ReportRenderError::encoding(error.to_string())
}
