pub mod cors;
pub mod handlers;
pub mod routes;
pub mod static_files;

pub use cors::CorsHeaders;
pub use handlers::{ApiError, AppState, ErrorResponse};
pub use routes::{create_api_router, ANALYTICS_PATH, LEGACY_ANALYTICS_PATH};
