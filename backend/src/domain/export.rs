//! Export shaping for the filtered guest list.
//!
//! The domain builds one format-neutral [`ExportReport`] from the filtered
//! records; renderers behind the
//! [`ReportRenderer`](crate::domain::ports::ReportRenderer) port turn it into
//! CSV, XLSX or PDF bytes. Every format shares the same six columns and one
//! data row per filtered record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{GuestFilter, GuestRecord, VisitDate, month_name};

/// Column labels shared by every export format.
pub const EXPORT_COLUMNS: [&str; 6] = [
    "Nama Lengkap",
    "Alamat",
    "No HP",
    "Tujuan Kunjungan",
    "Tanggal Kunjungan",
    "Waktu Input",
];

/// Placeholder rendered for an absent phone number.
pub const MISSING_PHONE: &str = "-";

const FILENAME_PREFIX: &str = "buku-tamu";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma separated values with a UTF-8 BOM.
    Csv,
    /// Office Open XML spreadsheet.
    Xlsx,
    /// Paginated PDF document.
    Pdf,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    /// MIME type of the rendered artifact.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error raised for an unknown export format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported export format `{0}`")]
pub struct UnknownExportFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "pdf" => Ok(Self::Pdf),
            other => Err(UnknownExportFormat(other.to_owned())),
        }
    }
}

/// Download name for an export created on `date`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use guestbook::domain::{ExportFormat, export_filename};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 12).expect("valid date");
/// assert_eq!(export_filename(ExportFormat::Pdf, date), "buku-tamu-2025-03-12.pdf");
/// ```
pub fn export_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{FILENAME_PREFIX}-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Title block settings for rendered reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    /// Report heading.
    pub title: String,
    /// Line printed under the heading.
    pub subtitle: String,
    /// Fixed offset used for every rendered timestamp.
    pub offset: FixedOffset,
}

/// One label/value pair describing an active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSummaryEntry {
    /// Filter name, e.g. `Bulan`.
    pub label: &'static str,
    /// Filter value, or `Semua`/`Tidak ada` when inactive.
    pub value: String,
}

/// Human-readable summary of `filter` for report headers.
pub fn filter_summary(filter: &GuestFilter) -> Vec<FilterSummaryEntry> {
    let all = || "Semua".to_owned();
    let search = filter.search.trim();
    vec![
        FilterSummaryEntry {
            label: "Hari",
            value: filter.day.map_or_else(all, |day| day.to_string()),
        },
        FilterSummaryEntry {
            label: "Bulan",
            value: filter
                .month
                .and_then(month_name)
                .map_or_else(all, str::to_owned),
        },
        FilterSummaryEntry {
            label: "Tahun",
            value: filter.year.map_or_else(all, |year| year.to_string()),
        },
        FilterSummaryEntry {
            label: "Pencarian",
            value: if search.is_empty() {
                "Tidak ada".to_owned()
            } else {
                format!("\"{search}\"")
            },
        },
    ]
}

/// One exported record with its timestamps already shifted to local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    full_name: String,
    address: String,
    phone: Option<String>,
    purpose: String,
    visit_date: Option<VisitDate>,
    raw_visit_date: String,
    created_at: DateTime<FixedOffset>,
}

impl ExportRow {
    /// Shape `record` for export in the given offset.
    pub fn from_record(record: &GuestRecord, offset: FixedOffset) -> Self {
        Self {
            full_name: record.full_name().to_owned(),
            address: record.address().to_owned(),
            phone: record.phone().map(str::to_owned),
            purpose: record.purpose().to_owned(),
            visit_date: record.visit_date(),
            raw_visit_date: record.raw_visit_date().to_owned(),
            created_at: record.created_at().with_timezone(&offset),
        }
    }

    /// Visitor's full name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Visitor's address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Phone digits or [`MISSING_PHONE`].
    pub fn phone_text(&self) -> &str {
        self.phone.as_deref().unwrap_or(MISSING_PHONE)
    }

    /// Purpose of the visit.
    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    /// Visit date as `YYYY-MM-DD`, or the stored text when malformed.
    pub fn visit_date_iso(&self) -> String {
        self.visit_date
            .map_or_else(|| self.raw_visit_date.clone(), |date| date.to_string())
    }

    /// Visit date as `12 Maret 2025`, or the stored text when malformed.
    pub fn visit_date_long(&self) -> String {
        self.visit_date
            .map_or_else(|| self.raw_visit_date.clone(), |date| date.long_form())
    }

    /// Input time as `YYYY-MM-DD HH:MM`.
    pub fn input_timestamp(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }

    /// Input time of day as `HH.MM`.
    pub fn input_clock(&self) -> String {
        self.created_at.format("%H.%M").to_string()
    }
}

/// Format-neutral report handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    title: String,
    subtitle: String,
    generated_at: DateTime<FixedOffset>,
    filters: Vec<FilterSummaryEntry>,
    rows: Vec<ExportRow>,
}

impl ExportReport {
    /// Build a report over already filtered `records`.
    pub fn build(
        records: &[&GuestRecord],
        filter: &GuestFilter,
        settings: &ReportSettings,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            title: settings.title.clone(),
            subtitle: settings.subtitle.clone(),
            generated_at: now.with_timezone(&settings.offset),
            filters: filter_summary(filter),
            rows: records
                .iter()
                .map(|record| ExportRow::from_record(record, settings.offset))
                .collect(),
        }
    }

    /// Report heading.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Line printed under the heading.
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Export timestamp in the report offset.
    pub fn generated_at(&self) -> DateTime<FixedOffset> {
        self.generated_at
    }

    /// Export timestamp as `12 Maret 2025 14.30`.
    pub fn generated_label(&self) -> String {
        format!(
            "{} {}",
            crate::domain::long_form(self.generated_at.date_naive()),
            self.generated_at.format("%H.%M")
        )
    }

    /// Export date used for the download name.
    pub fn export_date(&self) -> NaiveDate {
        self.generated_at.date_naive()
    }

    /// Active filter summary.
    pub fn filters(&self) -> &[FilterSummaryEntry] {
        &self.filters
    }

    /// Data rows, one per filtered record.
    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }
}

/// Rendered export ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Download file name.
    pub filename: String,
    /// MIME type.
    pub content_type: &'static str,
    /// Rendered bytes.
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    //! Report shaping coverage.

    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{GuestId, GuestRecordPayload};

    #[fixture]
    fn settings() -> ReportSettings {
        ReportSettings {
            title: "Buku Tamu Digital".to_owned(),
            subtitle: "Desa Gunungwangi".to_owned(),
            offset: FixedOffset::east_opt(7 * 3600).expect("valid offset"),
        }
    }

    fn record(phone: Option<&str>, visit_date: &str) -> GuestRecord {
        GuestRecord::new(GuestRecordPayload {
            id: GuestId::new("1").expect("valid id"),
            full_name: "Budi Santoso".to_owned(),
            address: "Jl. Merdeka".to_owned(),
            phone: phone.map(str::to_owned),
            purpose: "Mengurus KTP".to_owned(),
            visit_date: visit_date.to_owned(),
            created_at: Utc
                .with_ymd_and_hms(2025, 3, 11, 20, 5, 0)
                .single()
                .expect("valid timestamp"),
        })
    }

    #[rstest]
    #[case("csv", ExportFormat::Csv)]
    #[case("XLSX", ExportFormat::Xlsx)]
    #[case("excel", ExportFormat::Xlsx)]
    #[case(" pdf ", ExportFormat::Pdf)]
    fn parses_format_names(#[case] raw: &str, #[case] expected: ExportFormat) {
        assert_eq!(raw.parse::<ExportFormat>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_formats() {
        assert!("docx".parse::<ExportFormat>().is_err());
    }

    #[rstest]
    fn rows_shift_input_time_to_local_offset(settings: ReportSettings) {
        let stored = record(None, "2025-03-12");
        let row = ExportRow::from_record(&stored, settings.offset);

        assert_eq!(row.phone_text(), MISSING_PHONE);
        assert_eq!(row.visit_date_iso(), "2025-03-12");
        assert_eq!(row.visit_date_long(), "12 Maret 2025");
        assert_eq!(row.input_timestamp(), "2025-03-12 03:05");
        assert_eq!(row.input_clock(), "03.05");
    }

    #[rstest]
    fn malformed_dates_export_raw_text(settings: ReportSettings) {
        let stored = record(Some("081234567890"), "kemarin");
        let row = ExportRow::from_record(&stored, settings.offset);
        assert_eq!(row.visit_date_long(), "kemarin");
        assert_eq!(row.phone_text(), "081234567890");
    }

    #[rstest]
    fn report_has_one_row_per_record(settings: ReportSettings) {
        let records = [record(None, "2025-03-12"), record(None, "2025-03-13")];
        let refs: Vec<&GuestRecord> = records.iter().collect();
        let now = Utc
            .with_ymd_and_hms(2025, 3, 12, 17, 30, 0)
            .single()
            .expect("valid timestamp");

        let report = ExportReport::build(&refs, &GuestFilter::default(), &settings, now);

        assert_eq!(report.rows().len(), 2);
        assert_eq!(report.export_date().to_string(), "2025-03-13");
        assert_eq!(report.generated_label(), "13 Maret 2025 00.30");
    }

    #[rstest]
    fn summary_names_active_filters() {
        let filter = GuestFilter {
            search: "budi".to_owned(),
            month: Some(3),
            ..GuestFilter::default()
        };
        let values: Vec<String> = filter_summary(&filter).into_iter().map(|e| e.value).collect();
        assert_eq!(values, vec!["Semua", "Maret", "Semua", "\"budi\""]);
    }

    #[rstest]
    fn summary_of_inactive_filter() {
        let values: Vec<String> = filter_summary(&GuestFilter::default())
            .into_iter()
            .map(|e| e.value)
            .collect();
        assert_eq!(values, vec!["Semua", "Semua", "Semua", "Tidak ada"]);
    }
}
