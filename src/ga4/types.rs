//! Wire types for the GA4 Data API `runReport` method.
//!
//! Only the subset of the request/response schema the dashboard uses is
//! modelled. Response values are optional all the way down; callers go
//! through the accessors on [`RunReportResponse`] and [`Row`] instead of
//! indexing into the vectors.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// GA4 dimensions queried by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DimensionName {
    PagePath,
    PageTitle,
    DeviceCategory,
    Browser,
    Date,
    Year,
    Month,
}

/// GA4 metrics queried by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricName {
    TotalUsers,
    Sessions,
    ScreenPageViews,
}

/// One end of a date range, in the syntax GA4 accepts: an absolute
/// `YYYY-MM-DD` date or a relative sentinel (`today`, `NdaysAgo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Date(NaiveDate),
    Today,
    DaysAgo(u32),
}

impl DateBound {
    /// The calendar date this bound denotes when "today" is `today`.
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            DateBound::Date(date) => date,
            DateBound::Today => today,
            DateBound::DaysAgo(n) => today
                .checked_sub_days(Days::new(u64::from(n)))
                .unwrap_or(NaiveDate::MIN),
        }
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateBound::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DateBound::Today => f.write_str("today"),
            DateBound::DaysAgo(n) => write!(f, "{n}daysAgo"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid GA4 date '{0}'")]
pub struct InvalidDateBound(String);

impl FromStr for DateBound {
    type Err = InvalidDateBound;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "today" {
            return Ok(DateBound::Today);
        }
        if let Some(n) = s.strip_suffix("daysAgo") {
            return n
                .parse()
                .map(DateBound::DaysAgo)
                .map_err(|_| InvalidDateBound(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DateBound::Date)
            .map_err(|_| InvalidDateBound(s.to_string()))
    }
}

impl Serialize for DateBound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateBound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: DateBound,
    pub end_date: DateBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: DimensionName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub name: MetricName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderTarget {
    Metric {
        #[serde(rename = "metricName")]
        metric_name: MetricName,
    },
    Dimension {
        #[serde(rename = "dimensionName")]
        dimension_name: DimensionName,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub desc: bool,
    #[serde(flatten)]
    pub target: OrderTarget,
}

impl OrderBy {
    pub fn metric_desc(metric_name: MetricName) -> Self {
        Self {
            desc: true,
            target: OrderTarget::Metric { metric_name },
        }
    }

    pub fn dimension_asc(dimension_name: DimensionName) -> Self {
        Self {
            desc: false,
            target: OrderTarget::Dimension { dimension_name },
        }
    }
}

/// Body of a `runReport` call, minus the property which goes in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    pub date_ranges: Vec<DateRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<Metric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_bys: Vec<OrderBy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub dimension_values: Vec<CellValue>,
    #[serde(default)]
    pub metric_values: Vec<CellValue>,
}

impl Row {
    pub fn new(dimensions: &[&str], metrics: &[&str]) -> Self {
        Self {
            dimension_values: dimensions.iter().copied().map(CellValue::from).collect(),
            metric_values: metrics.iter().copied().map(CellValue::from).collect(),
        }
    }

    pub fn dimension(&self, index: usize) -> Option<&str> {
        self.dimension_values
            .get(index)
            .and_then(|cell| cell.value.as_deref())
    }

    pub fn metric(&self, index: usize) -> Option<&str> {
        self.metric_values
            .get(index)
            .and_then(|cell| cell.value.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    /// GA4 omits `rows` entirely when nothing matched.
    #[serde(default)]
    pub rows: Option<Vec<Row>>,
}

impl RunReportResponse {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows: Some(rows) }
    }

    pub fn rows(&self) -> &[Row] {
        self.rows.as_deref().unwrap_or(&[])
    }

    /// First metric of the first row, the shape of a dimensionless total.
    pub fn first_metric(&self) -> Option<&str> {
        self.rows().first().and_then(|row| row.metric(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn date_bounds_use_ga4_syntax() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(DateBound::Date(date).to_string(), "2024-03-09");
        assert_eq!(DateBound::Today.to_string(), "today");
        assert_eq!(DateBound::DaysAgo(30).to_string(), "30daysAgo");
        assert_eq!("30daysAgo".parse::<DateBound>().unwrap(), DateBound::DaysAgo(30));
        assert!("soon".parse::<DateBound>().is_err());
    }

    #[test]
    fn relative_bounds_resolve_against_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(DateBound::Today.resolve(today), today);
        assert_eq!(
            DateBound::DaysAgo(30).resolve(today),
            NaiveDate::from_ymd_opt(2025, 1, 30).unwrap()
        );
    }

    #[test]
    fn request_serializes_like_the_data_api_expects() {
        let request = RunReportRequest {
            date_ranges: vec![DateRange {
                start_date: DateBound::DaysAgo(30),
                end_date: DateBound::Today,
            }],
            dimensions: vec![Dimension {
                name: DimensionName::PagePath,
            }],
            metrics: vec![Metric {
                name: MetricName::ScreenPageViews,
            }],
            limit: Some(10),
            order_bys: vec![
                OrderBy::metric_desc(MetricName::ScreenPageViews),
                OrderBy::dimension_asc(DimensionName::Date),
            ],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "dateRanges": [{"startDate": "30daysAgo", "endDate": "today"}],
                "dimensions": [{"name": "pagePath"}],
                "metrics": [{"name": "screenPageViews"}],
                "limit": 10,
                "orderBys": [
                    {"desc": true, "metric": {"metricName": "screenPageViews"}},
                    {"dimension": {"dimensionName": "date"}}
                ]
            })
        );
    }

    #[test]
    fn absent_rows_and_values_read_as_none() {
        let empty: RunReportResponse = serde_json::from_value(json!({"rowCount": 0})).unwrap();
        assert!(empty.rows().is_empty());
        assert_eq!(empty.first_metric(), None);

        let sparse: RunReportResponse = serde_json::from_value(json!({
            "rows": [{"dimensionValues": [{}], "metricValues": []}]
        }))
        .unwrap();
        let row = &sparse.rows()[0];
        assert_eq!(row.dimension(0), None);
        assert_eq!(row.dimension(3), None);
        assert_eq!(row.metric(0), None);
    }
}
