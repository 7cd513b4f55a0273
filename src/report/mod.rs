//! Report aggregation: GA4 query fan-out and response shaping.

pub mod aggregator;
pub mod dates;
pub mod models;
pub mod queries;
pub mod shaping;

pub use aggregator::{assemble, AggregationError, ReportAggregator, SlotResponses};
pub use dates::ReportDates;
pub use models::{AnalyticsReport, CountMap, DailyVisits, PeriodVisits, TopPage};
pub use queries::ReportSlot;
