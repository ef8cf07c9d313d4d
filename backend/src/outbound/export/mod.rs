//! Report renderers for the export download.
//!
//! Each renderer implements the `ReportRenderer` port for one format. All
//! formats write the same six columns, one row per filtered record; they
//! differ only in how dates are spelled.

mod csv;
mod pdf;
mod xlsx;

pub use self::csv::CsvRenderer;
pub use self::pdf::PdfRenderer;
pub use self::xlsx::XlsxRenderer;

use std::sync::Arc;

use crate::domain::ports::ReportRenderer;
use crate::domain::{ExportReport, ExportRow};

/// Every built-in renderer.
pub fn default_renderers() -> Vec<Arc<dyn ReportRenderer>> {
    vec![
        Arc::new(CsvRenderer),
        Arc::new(XlsxRenderer),
        Arc::new(PdfRenderer::default()),
    ]
}

/// Date spelling used in the table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateStyle {
    /// `2025-03-12` and `2025-03-12 09:15`, for re-import.
    Iso,
    /// `12 Maret 2025` and `09.15`, for people.
    Long,
}

fn row_cells(row: &ExportRow, style: DateStyle) -> [String; 6] {
    let (visit_date, input_time) = match style {
        DateStyle::Iso => (row.visit_date_iso(), row.input_timestamp()),
        DateStyle::Long => (row.visit_date_long(), row.input_clock()),
    };
    [
        row.full_name().to_owned(),
        row.address().to_owned(),
        row.phone_text().to_owned(),
        row.purpose().to_owned(),
        visit_date,
        input_time,
    ]
}

fn table(report: &ExportReport, style: DateStyle) -> Vec<[String; 6]> {
    report
        .rows()
        .iter()
        .map(|row| row_cells(row, style))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared report fixture for renderer tests.

    use chrono::{FixedOffset, TimeZone, Utc};

    use crate::domain::{
        ExportReport, GuestFilter, GuestId, GuestRecord, GuestRecordPayload, ReportSettings,
    };

    pub(crate) fn record(id: &str, name: &str, phone: Option<&str>, purpose: &str) -> GuestRecord {
        GuestRecord::new(GuestRecordPayload {
            id: GuestId::new(id).expect("valid id"),
            full_name: name.to_owned(),
            address: "Dusun Krajan RT 01/02".to_owned(),
            phone: phone.map(str::to_owned),
            purpose: purpose.to_owned(),
            visit_date: "2025-03-12".to_owned(),
            created_at: Utc
                .with_ymd_and_hms(2025, 3, 12, 2, 15, 0)
                .single()
                .expect("valid timestamp"),
        })
    }

    /// Three filtered records, one with quotes and one without a phone.
    pub(crate) fn three_row_report() -> ExportReport {
        let records = [
            record("1", "Budi Santoso", Some("081234567890"), "Mengurus surat"),
            record("2", "Siti \"Ina\" Aminah", None, "Rapat desa, bahas irigasi"),
            record("3", "Agus Salim", Some("085712345678"), "Kunjungan budidaya"),
        ];
        let refs: Vec<&GuestRecord> = records.iter().collect();
        ExportReport::build(
            &refs,
            &GuestFilter {
                month: Some(3),
                ..GuestFilter::default()
            },
            &ReportSettings {
                title: "Buku Tamu Digital".to_owned(),
                subtitle: "Desa Gunungwangi".to_owned(),
                offset: FixedOffset::east_opt(7 * 3600).expect("valid offset"),
            },
            Utc.with_ymd_and_hms(2025, 3, 12, 7, 30, 0)
                .single()
                .expect("valid timestamp"),
        )
    }
}
