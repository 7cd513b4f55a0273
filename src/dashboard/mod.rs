//! Dashboard renderer
//!
//! Fetches one [`AnalyticsReport`](crate::report::AnalyticsReport) from the
//! aggregator endpoint and paints it onto a [`DashboardSurface`]: summary
//! counters, the top-pages list and four charts. Every element and canvas
//! is optional on the surface; missing ones are skipped.

pub mod charts;
pub mod client;
pub mod renderer;
pub mod surface;
pub mod terminal;

pub use charts::{ChartKind, ChartRegistry, ChartSpec};
pub use client::{DashboardClient, FetchError};
pub use renderer::DashboardRenderer;
pub use surface::{Canvas, ChartHandle, DashboardSurface, Element, PageLink, TopPagesView};
pub use terminal::TerminalSurface;
