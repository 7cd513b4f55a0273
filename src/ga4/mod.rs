//! GA4 Data API client.

pub mod client;
pub mod types;

pub use client::{Ga4Client, ReportClient, ReportError};
pub use types::{
    CellValue, DateBound, DateRange, Dimension, DimensionName, Metric, MetricName, OrderBy,
    OrderTarget, Row, RunReportRequest, RunReportResponse,
};
