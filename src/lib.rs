pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod ga4;
pub mod locale;
pub mod report;
