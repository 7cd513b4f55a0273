//! Fan-out of the report queries and assembly of the final document.
//!
//! Each query runs as its own task in a [`JoinSet`]. The first failure
//! wins: the error is returned immediately and dropping the set aborts
//! whatever is still in flight.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

use super::dates::ReportDates;
use super::models::AnalyticsReport;
use super::queries::ReportSlot;
use super::shaping;
use crate::config::ReportConfig;
use crate::ga4::{ReportClient, ReportError, RunReportResponse};

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("{slot} query failed: {source}")]
    Query {
        slot: &'static str,
        #[source]
        source: ReportError,
    },
    #[error("report query task did not complete: {0}")]
    Task(#[from] JoinError),
}

/// One response per [`ReportSlot`], indexed by the slot.
#[derive(Debug, Clone, Default)]
pub struct SlotResponses([RunReportResponse; ReportSlot::ALL.len()]);

impl SlotResponses {
    pub fn get(&self, slot: ReportSlot) -> &RunReportResponse {
        &self.0[slot.index()]
    }

    pub fn set(&mut self, slot: ReportSlot, response: RunReportResponse) {
        self.0[slot.index()] = response;
    }
}

/// Builds [`AnalyticsReport`]s from a shared upstream client.
pub struct ReportAggregator {
    client: Arc<dyn ReportClient>,
    config: ReportConfig,
}

impl ReportAggregator {
    pub fn new(client: Arc<dyn ReportClient>, config: ReportConfig) -> Self {
        Self { client, config }
    }

    pub async fn aggregate(&self) -> Result<AnalyticsReport, AggregationError> {
        self.aggregate_at(Utc::now()).await
    }

    pub async fn aggregate_at(&self, now: DateTime<Utc>) -> Result<AnalyticsReport, AggregationError> {
        let started = Instant::now();
        let dates = ReportDates::at(now);
        let responses = self.fetch_all(&dates).await?;
        let report = assemble(&responses, now, &self.config);

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            top_pages = report.top_pages.len(),
            daily_points = report.daily_visits.len(),
            "Assembled analytics report"
        );
        Ok(report)
    }

    async fn fetch_all(&self, dates: &ReportDates) -> Result<SlotResponses, AggregationError> {
        let mut tasks = JoinSet::new();
        for slot in ReportSlot::ALL {
            let client = Arc::clone(&self.client);
            let request = slot.request(dates, self.config.epoch_start);
            tasks.spawn(async move { (slot, client.run_report(&request).await) });
        }

        let mut responses = SlotResponses::default();
        while let Some(joined) = tasks.join_next().await {
            let (slot, result) = joined?;
            match result {
                Ok(response) => responses.set(slot, response),
                Err(source) => {
                    warn!(slot = slot.name(), "Report query failed, abandoning the rest");
                    return Err(AggregationError::Query {
                        slot: slot.name(),
                        source,
                    });
                }
            }
        }
        Ok(responses)
    }
}

/// Shape a full set of slot responses into the report document.
pub fn assemble(
    responses: &SlotResponses,
    last_update: DateTime<Utc>,
    config: &ReportConfig,
) -> AnalyticsReport {
    AnalyticsReport {
        total_visits: shaping::total(responses.get(ReportSlot::TotalVisits)),
        monthly_visits: shaping::total(responses.get(ReportSlot::MonthlyVisits)),
        top_pages: shaping::top_pages(responses.get(ReportSlot::TopPages)),
        devices: shaping::devices(responses.get(ReportSlot::Devices)),
        browsers: shaping::browsers(responses.get(ReportSlot::Browsers)),
        daily_visits: shaping::daily_visits(responses.get(ReportSlot::DailyVisits)),
        monthly_trend: shaping::monthly_trend(
            responses.get(ReportSlot::MonthlyTrend),
            config.locale,
        ),
        last_update,
    }
}
