//! Date anchors for one aggregation run.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

pub const DAILY_WINDOW_DAYS: u32 = 30;
pub const TREND_WINDOW_MONTHS: u32 = 6;

/// Every date a report query needs, derived from a single "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportDates {
    pub now: DateTime<Utc>,
    pub today: NaiveDate,
    /// Same calendar day one year earlier; Feb 29 clamps to Feb 28.
    pub one_year_ago: NaiveDate,
    pub month_start: NaiveDate,
    /// Start of the monthly trend window. GA4 has no `NmonthsAgo`
    /// sentinel, so this one is always sent as an absolute date.
    pub trend_start: NaiveDate,
}

impl ReportDates {
    pub fn at(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        Self {
            now,
            today,
            one_year_ago: months_before(today, 12),
            month_start: today.with_day(1).unwrap_or(today),
            trend_start: months_before(today, TREND_WINDOW_MONTHS),
        }
    }
}

fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}
