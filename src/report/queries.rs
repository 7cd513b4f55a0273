//! The fixed set of GA4 queries behind one dashboard report.

use chrono::NaiveDate;

use super::dates::{ReportDates, DAILY_WINDOW_DAYS};
use crate::ga4::{
    DateBound, DateRange, Dimension, DimensionName, Metric, MetricName, OrderBy, RunReportRequest,
};

pub const TOP_PAGES_LIMIT: u32 = 10;
pub const TOP_BROWSERS_LIMIT: u32 = 5;

/// Which part of the report a query fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportSlot {
    TotalVisits,
    MonthlyVisits,
    TopPages,
    Devices,
    Browsers,
    DailyVisits,
    MonthlyTrend,
}

impl ReportSlot {
    pub const ALL: [ReportSlot; 7] = [
        ReportSlot::TotalVisits,
        ReportSlot::MonthlyVisits,
        ReportSlot::TopPages,
        ReportSlot::Devices,
        ReportSlot::Browsers,
        ReportSlot::DailyVisits,
        ReportSlot::MonthlyTrend,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ReportSlot::TotalVisits => "total_visits",
            ReportSlot::MonthlyVisits => "monthly_visits",
            ReportSlot::TopPages => "top_pages",
            ReportSlot::Devices => "devices",
            ReportSlot::Browsers => "browsers",
            ReportSlot::DailyVisits => "daily_visits",
            ReportSlot::MonthlyTrend => "monthly_trend",
        }
    }

    /// The `runReport` body for this slot.
    pub fn request(self, dates: &ReportDates, epoch_start: NaiveDate) -> RunReportRequest {
        let until_today = |start: DateBound| {
            vec![DateRange {
                start_date: start,
                end_date: DateBound::Today,
            }]
        };
        let last_year = until_today(DateBound::Date(dates.one_year_ago));

        match self {
            ReportSlot::TotalVisits => RunReportRequest {
                date_ranges: until_today(DateBound::Date(epoch_start)),
                dimensions: vec![],
                metrics: metrics(MetricName::TotalUsers),
                limit: None,
                order_bys: vec![],
            },
            ReportSlot::MonthlyVisits => RunReportRequest {
                date_ranges: until_today(DateBound::Date(dates.month_start)),
                dimensions: vec![],
                metrics: metrics(MetricName::TotalUsers),
                limit: None,
                order_bys: vec![],
            },
            ReportSlot::TopPages => RunReportRequest {
                date_ranges: last_year,
                dimensions: dimensions(&[DimensionName::PagePath, DimensionName::PageTitle]),
                metrics: metrics(MetricName::ScreenPageViews),
                limit: Some(TOP_PAGES_LIMIT),
                order_bys: vec![OrderBy::metric_desc(MetricName::ScreenPageViews)],
            },
            ReportSlot::Devices => RunReportRequest {
                date_ranges: last_year,
                dimensions: dimensions(&[DimensionName::DeviceCategory]),
                metrics: metrics(MetricName::Sessions),
                limit: None,
                order_bys: vec![],
            },
            ReportSlot::Browsers => RunReportRequest {
                date_ranges: last_year,
                dimensions: dimensions(&[DimensionName::Browser]),
                metrics: metrics(MetricName::Sessions),
                limit: Some(TOP_BROWSERS_LIMIT),
                order_bys: vec![OrderBy::metric_desc(MetricName::Sessions)],
            },
            ReportSlot::DailyVisits => RunReportRequest {
                date_ranges: until_today(DateBound::DaysAgo(DAILY_WINDOW_DAYS)),
                dimensions: dimensions(&[DimensionName::Date]),
                metrics: metrics(MetricName::TotalUsers),
                limit: None,
                order_bys: vec![OrderBy::dimension_asc(DimensionName::Date)],
            },
            ReportSlot::MonthlyTrend => RunReportRequest {
                date_ranges: until_today(DateBound::Date(dates.trend_start)),
                dimensions: dimensions(&[DimensionName::Year, DimensionName::Month]),
                metrics: metrics(MetricName::TotalUsers),
                limit: None,
                order_bys: vec![
                    OrderBy::dimension_asc(DimensionName::Year),
                    OrderBy::dimension_asc(DimensionName::Month),
                ],
            },
        }
    }
}

fn dimensions(names: &[DimensionName]) -> Vec<Dimension> {
    names.iter().map(|&name| Dimension { name }).collect()
}

fn metrics(name: MetricName) -> Vec<Metric> {
    vec![Metric { name }]
}
