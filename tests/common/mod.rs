//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use chrono::NaiveDate;
use ga4_dashboard::api::{create_api_router, CorsHeaders};
use ga4_dashboard::config::{FrontendConfig, ReportConfig};
use ga4_dashboard::ga4::{
    DateBound, DimensionName, ReportClient, ReportError, Row, RunReportRequest, RunReportResponse,
};
use ga4_dashboard::report::ReportAggregator;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const TEST_ORIGIN: &str = "https://www.example.org";

/// Canned GA4 answers keyed on the request's first dimension.
#[derive(Default)]
pub struct FixtureClient {
    pub empty_devices: bool,
    pub empty_pages: bool,
    pub fail_on: Option<DimensionName>,
    pub calls: AtomicUsize,
}

impl FixtureClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn epoch() -> NaiveDate {
    ReportConfig::default_epoch_start()
}

#[async_trait]
impl ReportClient for FixtureClient {
    async fn run_report(&self, request: &RunReportRequest) -> Result<RunReportResponse, ReportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let first = request.dimensions.first().map(|d| d.name);

        if first.is_some() && first == self.fail_on {
            return Err(ReportError::Status {
                status: reqwest::StatusCode::UNAUTHORIZED,
                body: r#"{"error":{"status":"UNAUTHENTICATED"}}"#.to_string(),
            });
        }

        let rows = match first {
            None if request.date_ranges[0].start_date == DateBound::Date(epoch()) => {
                vec![Row::new(&[], &["1234"])]
            }
            None => vec![Row::new(&[], &["56"])],
            Some(DimensionName::PagePath) if self.empty_pages => vec![],
            Some(DimensionName::PagePath) => vec![
                Row::new(&["/", "Inicio"], &["500"]),
                Row::new(&["tramites", "Trámites"], &["320"]),
            ],
            Some(DimensionName::DeviceCategory) if self.empty_devices => {
                return Ok(RunReportResponse::default());
            }
            Some(DimensionName::DeviceCategory) => vec![
                Row::new(&["desktop"], &["300"]),
                Row::new(&["mobile"], &["200"]),
                Row::new(&["tablet"], &["10"]),
            ],
            Some(DimensionName::Browser) => vec![
                Row::new(&["Chrome"], &["400"]),
                Row::new(&["Safari"], &["90"]),
                Row::new(&["Edge"], &["20"]),
            ],
            Some(DimensionName::Date) => vec![
                Row::new(&["20251016"], &["10"]),
                Row::new(&["20251017"], &["12"]),
                Row::new(&["20251018"], &[]),
            ],
            Some(DimensionName::Year) => vec![
                Row::new(&["2025", "9"], &["100"]),
                Row::new(&["2025", "10"], &["40"]),
            ],
            Some(_) => vec![],
        };
        Ok(RunReportResponse::from_rows(rows))
    }
}

pub fn create_test_router(client: Arc<FixtureClient>) -> Router {
    let aggregator = ReportAggregator::new(client, ReportConfig::default());
    let cors = CorsHeaders::new(TEST_ORIGIN).unwrap();
    create_api_router(aggregator, cors, FrontendConfig { static_dir: None })
}

/// Serve `router` on an ephemeral localhost port.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}
