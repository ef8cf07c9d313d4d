//! Dashboard counters and chart series derived from the record list.
//!
//! Everything here is a pure function of the records plus the local calendar
//! date supplied by the caller. Visit dates drive every series; stored rows
//! with malformed dates only count towards totals and purpose breakdowns.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{GuestFilter, GuestRecord, distinct_years, month_name};

/// Number of days in the daily series, ending today.
pub const DAILY_WINDOW: u64 = 7;
/// Number of months in the monthly series, ending this month.
pub const MONTHLY_WINDOW: u32 = 6;

/// Broad purpose buckets used by the purpose chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
pub enum PurposeCategory {
    /// Tourism or holiday visits.
    Wisata,
    /// Business or work visits.
    Bisnis,
    /// Family visits.
    Keluarga,
    /// Everything else.
    Lainnya,
}

impl PurposeCategory {
    /// Bucket a free-text purpose by keyword.
    pub fn classify(purpose: &str) -> Self {
        let lower = purpose.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|word| lower.contains(word));
        if has(&["wisata", "liburan"]) {
            Self::Wisata
        } else if has(&["bisnis", "kerja"]) {
            Self::Bisnis
        } else if has(&["keluarga", "saudara"]) {
            Self::Keluarga
        } else {
            Self::Lainnya
        }
    }
}

/// Visits on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    /// Day as `YYYY-MM-DD`.
    #[schema(value_type = String, example = "2025-03-12")]
    pub date: NaiveDate,
    /// Short label such as `Rab 12`.
    pub label: String,
    /// Number of visits.
    pub count: usize,
}

/// Visits in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    /// Calendar year.
    pub year: i32,
    /// 1-indexed month.
    pub month: u32,
    /// Label such as `Maret 2025`.
    pub label: String,
    /// Number of visits.
    pub count: usize,
}

/// Visits per purpose bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurposeShare {
    /// Purpose bucket.
    pub category: PurposeCategory,
    /// Number of visits.
    pub count: usize,
    /// Rounded share of all visits, `0..=100`.
    pub percent: usize,
}

/// Visits per exact purpose text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurposeCount {
    /// Purpose as typed.
    pub purpose: String,
    /// Number of visits.
    pub count: usize,
}

/// Statistics snapshot served to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestStatistics {
    /// Every stored record.
    pub total: usize,
    /// Visits dated today.
    pub today: usize,
    /// Visits dated in the current month.
    pub this_month: usize,
    /// Records matching the requested month/year period.
    pub period_total: usize,
    /// One entry per day, oldest first, ending today.
    pub last_seven_days: Vec<DailyCount>,
    /// One entry per month, oldest first, ending this month.
    pub last_six_months: Vec<MonthlyCount>,
    /// Twelve entries for the breakdown year.
    pub monthly_breakdown: Vec<MonthlyCount>,
    /// Purpose buckets within the requested period.
    pub purpose_categories: Vec<PurposeShare>,
    /// Exact purposes within the requested period, most frequent first.
    pub top_purposes: Vec<PurposeCount>,
    /// Distinct visit years, newest first.
    pub years: Vec<i32>,
}

/// Period selection for the statistics view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticsPeriod {
    /// 1-indexed month, `None` for the whole year.
    pub month: Option<u32>,
    /// Year, `None` for all years.
    pub year: Option<i32>,
}

/// Compute the dashboard statistics for `records` as seen on `today`.
pub fn compute_statistics(
    records: &[GuestRecord],
    today: NaiveDate,
    period: StatisticsPeriod,
) -> GuestStatistics {
    let period_filter = GuestFilter {
        month: period.month,
        year: period.year,
        ..GuestFilter::default()
    };
    let in_period = period_filter.apply(records);
    let breakdown_year = period.year.unwrap_or_else(|| today.year());

    GuestStatistics {
        total: records.len(),
        today: count_where(records, |date| date == today),
        this_month: count_where(records, |date| {
            date.year() == today.year() && date.month() == today.month()
        }),
        period_total: in_period.len(),
        last_seven_days: daily_series(records, today),
        last_six_months: monthly_series(records, today),
        monthly_breakdown: (1..=12)
            .map(|month| month_count(records, breakdown_year, month))
            .collect(),
        purpose_categories: purpose_categories(&in_period),
        top_purposes: top_purposes(&in_period),
        years: distinct_years(records),
    }
}

fn count_where(records: &[GuestRecord], predicate: impl Fn(NaiveDate) -> bool) -> usize {
    records
        .iter()
        .filter_map(GuestRecord::visit_date)
        .filter(|date| predicate(date.as_naive()))
        .count()
}

fn weekday_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Sen",
        Weekday::Tue => "Sel",
        Weekday::Wed => "Rab",
        Weekday::Thu => "Kam",
        Weekday::Fri => "Jum",
        Weekday::Sat => "Sab",
        Weekday::Sun => "Min",
    }
}

fn daily_series(records: &[GuestRecord], today: NaiveDate) -> Vec<DailyCount> {
    (0..DAILY_WINDOW)
        .rev()
        .filter_map(|back| today.checked_sub_days(chrono::Days::new(back)))
        .map(|date| DailyCount {
            date,
            label: format!("{} {}", weekday_short(date.weekday()), date.day()),
            count: count_where(records, |visit| visit == date),
        })
        .collect()
}

fn month_count(records: &[GuestRecord], year: i32, month: u32) -> MonthlyCount {
    MonthlyCount {
        year,
        month,
        label: format!("{} {year}", month_name(month).unwrap_or_default()),
        count: count_where(records, |date| date.year() == year && date.month() == month),
    }
}

fn monthly_series(records: &[GuestRecord], today: NaiveDate) -> Vec<MonthlyCount> {
    let Some(first_of_month) = today.with_day(1) else {
        return Vec::new();
    };
    (0..MONTHLY_WINDOW)
        .rev()
        .filter_map(|back| first_of_month.checked_sub_months(Months::new(back)))
        .map(|start| month_count(records, start.year(), start.month()))
        .collect()
}

fn rounded_percent(count: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    // Round half up without leaving integer arithmetic.
    (count.saturating_mul(200).saturating_add(total)) / total.saturating_mul(2)
}

fn purpose_categories(records: &[&GuestRecord]) -> Vec<PurposeShare> {
    let mut counts: BTreeMap<PurposeCategory, usize> = BTreeMap::new();
    for record in records {
        *counts
            .entry(PurposeCategory::classify(record.purpose()))
            .or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(category, count)| PurposeShare {
            category,
            count,
            percent: rounded_percent(count, records.len()),
        })
        .collect()
}

fn top_purposes(records: &[&GuestRecord]) -> Vec<PurposeCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.purpose()).or_default() += 1;
    }
    let mut purposes: Vec<PurposeCount> = counts
        .into_iter()
        .map(|(purpose, count)| PurposeCount {
            purpose: purpose.to_owned(),
            count,
        })
        .collect();
    purposes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.purpose.cmp(&b.purpose)));
    purposes
}

#[cfg(test)]
mod tests {
    //! Counter and series coverage.

    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{GuestId, GuestRecordPayload};

    fn record(id: usize, purpose: &str, visit_date: &str) -> GuestRecord {
        GuestRecord::new(GuestRecordPayload {
            id: GuestId::new(id.to_string()).expect("valid id"),
            full_name: "Tamu Desa".to_owned(),
            address: "Gunungwangi".to_owned(),
            phone: None,
            purpose: purpose.to_owned(),
            visit_date: visit_date.to_owned(),
            created_at: Utc
                .with_ymd_and_hms(2025, 3, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        })
    }

    #[fixture]
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).expect("valid date")
    }

    #[fixture]
    fn records() -> Vec<GuestRecord> {
        vec![
            record(1, "Liburan keluarga", "2025-03-12"),
            record(2, "Urusan kerja", "2025-03-12"),
            record(3, "Urusan kerja", "2025-03-06"),
            record(4, "Mengurus KTP", "2025-01-20"),
            record(5, "Kunjungan saudara", "2024-12-31"),
            record(6, "Mengurus KTP", "tanggal rusak"),
        ]
    }

    #[rstest]
    fn headline_counters(records: Vec<GuestRecord>, today: NaiveDate) {
        let stats = compute_statistics(&records, today, StatisticsPeriod::default());
        assert_eq!(stats.total, 6);
        assert_eq!(stats.today, 2);
        assert_eq!(stats.this_month, 3);
        assert_eq!(stats.period_total, 6);
    }

    #[rstest]
    fn daily_series_ends_today(records: Vec<GuestRecord>, today: NaiveDate) {
        let stats = compute_statistics(&records, today, StatisticsPeriod::default());
        let counts: Vec<usize> = stats.last_seven_days.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 0, 0, 0, 2]);
        assert_eq!(
            stats.last_seven_days.last().map(|d| d.label.as_str()),
            Some("Rab 12")
        );
    }

    #[rstest]
    fn monthly_series_crosses_year_boundary(records: Vec<GuestRecord>, today: NaiveDate) {
        let stats = compute_statistics(&records, today, StatisticsPeriod::default());
        let labels: Vec<&str> = stats.last_six_months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Oktober 2024",
                "November 2024",
                "Desember 2024",
                "Januari 2025",
                "Februari 2025",
                "Maret 2025",
            ]
        );
        let counts: Vec<usize> = stats.last_six_months.iter().map(|m| m.count).collect();
        assert_eq!(counts, vec![0, 0, 1, 1, 0, 3]);
    }

    #[rstest]
    fn period_narrows_purpose_breakdown(records: Vec<GuestRecord>, today: NaiveDate) {
        let period = StatisticsPeriod {
            month: Some(3),
            year: Some(2025),
        };
        let stats = compute_statistics(&records, today, period);

        assert_eq!(stats.period_total, 3);
        assert_eq!(
            stats.top_purposes.first(),
            Some(&PurposeCount {
                purpose: "Urusan kerja".to_owned(),
                count: 2,
            })
        );
        let categories: Vec<(PurposeCategory, usize)> = stats
            .purpose_categories
            .iter()
            .map(|share| (share.category, share.percent))
            .collect();
        assert_eq!(
            categories,
            vec![(PurposeCategory::Wisata, 33), (PurposeCategory::Bisnis, 67)]
        );
    }

    #[rstest]
    fn breakdown_has_twelve_months(records: Vec<GuestRecord>, today: NaiveDate) {
        let stats = compute_statistics(&records, today, StatisticsPeriod::default());
        assert_eq!(stats.monthly_breakdown.len(), 12);
        assert_eq!(stats.years, vec![2025, 2024]);
    }

    #[rstest]
    #[case("Liburan ke curug", PurposeCategory::Wisata)]
    #[case("Rapat BISNIS", PurposeCategory::Bisnis)]
    #[case("Menjenguk saudara", PurposeCategory::Keluarga)]
    #[case("Mengurus KTP", PurposeCategory::Lainnya)]
    fn classifies_purposes(#[case] purpose: &str, #[case] expected: PurposeCategory) {
        assert_eq!(PurposeCategory::classify(purpose), expected);
    }

    #[rstest]
    fn empty_list_has_zero_percentages(today: NaiveDate) {
        let stats = compute_statistics(&[], today, StatisticsPeriod::default());
        assert_eq!(stats.total, 0);
        assert!(stats.purpose_categories.is_empty());
    }
}
