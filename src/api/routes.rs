use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::FrontendConfig;
use crate::report::ReportAggregator;

use super::cors::{apply_cors_headers, CorsHeaders};
use super::handlers::{get_analytics, health_check, preflight, AppState};
use super::static_files::serve_embedded;

pub const ANALYTICS_PATH: &str = "/get-analytics";
/// Path the dashboard used when the aggregator ran as a Netlify function.
pub const LEGACY_ANALYTICS_PATH: &str = "/.netlify/functions/get-analytics";

pub fn create_api_router(
    aggregator: ReportAggregator,
    cors: CorsHeaders,
    frontend: FrontendConfig,
) -> Router {
    let state = Arc::new(AppState { aggregator });

    let analytics_routes = Router::new()
        .route(ANALYTICS_PATH, get(get_analytics).options(preflight))
        .route(LEGACY_ANALYTICS_PATH, get(get_analytics).options(preflight))
        .route_layer(middleware::from_fn_with_state(
            Arc::new(cors),
            apply_cors_headers,
        ))
        .with_state(state);

    let router = Router::new()
        .route("/health", get(health_check))
        .merge(analytics_routes);

    let router = match frontend.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.fallback(serve_embedded),
    };

    router.layer(TraceLayer::new_for_http())
}
