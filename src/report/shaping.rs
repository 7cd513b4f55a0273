//! Turning raw `runReport` rows into report fields.
//!
//! Nothing here fails: missing rows, cells and unparseable numbers all
//! degrade to zero or to the raw upstream text.

use chrono::NaiveDate;

use super::models::{CountMap, DailyVisits, PeriodVisits, TopPage};
use super::queries::{TOP_BROWSERS_LIMIT, TOP_PAGES_LIMIT};
use crate::ga4::{Row, RunReportResponse};
use crate::locale::Locale;

/// Parse a metric cell as a non-negative base-10 integer.
///
/// Reads leading digits after optional whitespace and `+`, so `"12.0"`
/// yields 12. Absent, empty, negative or non-numeric values yield 0 and
/// values beyond `u64` saturate.
pub fn coerce_count(value: Option<&str>) -> u64 {
    let raw = value.unwrap_or("0").trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    raw.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        })
}

pub fn total(response: &RunReportResponse) -> u64 {
    coerce_count(response.first_metric())
}

pub fn top_pages(response: &RunReportResponse) -> Vec<TopPage> {
    response
        .rows()
        .iter()
        .take(TOP_PAGES_LIMIT as usize)
        .map(|row| TopPage {
            path: row.dimension(0).unwrap_or_default().to_string(),
            title: row.dimension(1).unwrap_or_default().to_string(),
            visits: coerce_count(row.metric(0)),
        })
        .collect()
}

pub fn devices(response: &RunReportResponse) -> CountMap {
    breakdown(response.rows())
}

pub fn browsers(response: &RunReportResponse) -> CountMap {
    breakdown(&response.rows()[..response.rows().len().min(TOP_BROWSERS_LIMIT as usize)])
}

fn breakdown(rows: &[Row]) -> CountMap {
    rows.iter()
        .map(|row| {
            (
                row.dimension(0).unwrap_or_default().to_string(),
                coerce_count(row.metric(0)),
            )
        })
        .collect()
}

pub fn daily_visits(response: &RunReportResponse) -> Vec<DailyVisits> {
    response
        .rows()
        .iter()
        .map(|row| DailyVisits {
            date: iso_date(row.dimension(0).unwrap_or_default()),
            visits: coerce_count(row.metric(0)),
        })
        .collect()
}

/// GA4's `date` dimension is `YYYYMMDD`; anything else passes through.
fn iso_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn monthly_trend(response: &RunReportResponse, locale: Locale) -> Vec<PeriodVisits> {
    response
        .rows()
        .iter()
        .map(|row| PeriodVisits {
            period: period_label(row.dimension(0), row.dimension(1), locale),
            visits: coerce_count(row.metric(0)),
        })
        .collect()
}

/// `year` + 1-based `month` dimensions → "ene 2025".
fn period_label(year: Option<&str>, month: Option<&str>, locale: Locale) -> String {
    let year_num = year.and_then(|y| y.trim().parse::<i32>().ok());
    let month0 = month
        .and_then(|m| m.trim().parse::<u32>().ok())
        .and_then(|m| m.checked_sub(1));

    match (year_num, month0) {
        (Some(y), Some(m)) => locale
            .period_label(y, m)
            .unwrap_or_else(|| format!("{} {}", month.unwrap_or_default(), y)),
        _ => format!("{} {}", month.unwrap_or_default(), year.unwrap_or_default())
            .trim()
            .to_string(),
    }
}
