use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use ga4_dashboard::api::{create_api_router, CorsHeaders, ANALYTICS_PATH};
use ga4_dashboard::config::Config;
use ga4_dashboard::ga4::Ga4Client;
use ga4_dashboard::report::ReportAggregator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // One GA4 client for the process lifetime, shared by every request
    let client = Ga4Client::from_config(&config.ga4)?;
    info!(
        "📈 Reporting on GA4 property {} via {}",
        config.ga4.property_id,
        client.endpoint()
    );
    let aggregator = ReportAggregator::new(Arc::new(client), config.report.clone());

    let cors = CorsHeaders::new(&config.cors.allow_origin)
        .with_context(|| format!("CORS_ALLOW_ORIGIN '{}' is not a valid header value", config.cors.allow_origin))?;

    if let Some(ref static_dir) = config.frontend.static_dir {
        info!("🎨 Serving dashboard from directory: {}", static_dir);
    } else {
        info!("🎨 Serving embedded dashboard");
    }

    let router = create_api_router(aggregator, cors, config.frontend.clone());

    let api_addr = format!("{}:{}", config.api_server.host, config.api_server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("🚀 API server listening on http://{}", api_addr);
    info!("   - Analytics report at http://{}{}", api_addr, ANALYTICS_PATH);
    info!("   - Dashboard UI available at http://{}/", api_addr);

    axum::serve(listener, router).await?;

    Ok(())
}
