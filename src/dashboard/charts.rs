//! Chart descriptions and per-canvas chart bookkeeping.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::surface::{Canvas, ChartHandle, DashboardSurface};
use crate::locale::Locale;
use crate::report::{CountMap, DailyVisits, PeriodVisits};

const BRAND: &str = "#069681";
const PALETTE: [&str; 6] = [BRAND, "#17a2b8", "#ffc107", "#dc3545", "#6c757d", "#f8f9fa"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Doughnut,
    Pie,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<&'static str>,
    pub begin_at_zero: bool,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn daily_visits(points: &[DailyVisits], locale: Locale) -> Self {
        Self {
            kind: ChartKind::Line,
            title: Some(
                match locale {
                    Locale::Es => "Visitas diarias",
                    Locale::En => "Daily visits",
                }
                .to_string(),
            ),
            labels: points
                .iter()
                .map(|p| match NaiveDate::parse_from_str(&p.date, "%Y-%m-%d") {
                    Ok(date) => locale.day_label(date),
                    Err(_) => p.date.clone(),
                })
                .collect(),
            values: points.iter().map(|p| p.visits).collect(),
            colors: vec![BRAND],
            begin_at_zero: false,
        }
    }

    pub fn devices(devices: &CountMap) -> Self {
        Self::breakdown(ChartKind::Doughnut, devices, 3)
    }

    pub fn browsers(browsers: &CountMap) -> Self {
        Self::breakdown(ChartKind::Pie, browsers, PALETTE.len())
    }

    fn breakdown(kind: ChartKind, counts: &CountMap, colors: usize) -> Self {
        Self {
            kind,
            title: None,
            labels: counts.keys().map(str::to_string).collect(),
            values: counts.values().collect(),
            colors: PALETTE[..colors].to_vec(),
            begin_at_zero: false,
        }
    }

    pub fn monthly_trend(points: &[PeriodVisits], locale: Locale) -> Self {
        Self {
            kind: ChartKind::Bar,
            title: Some(
                match locale {
                    Locale::Es => "Visitas mensuales",
                    Locale::En => "Monthly visits",
                }
                .to_string(),
            ),
            labels: points.iter().map(|p| p.period.clone()).collect(),
            values: points.iter().map(|p| p.visits).collect(),
            colors: vec![BRAND],
            begin_at_zero: true,
        }
    }
}

/// Remembers which chart is bound to which canvas so a redraw replaces
/// the previous chart instead of stacking a second one on top.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    bound: HashMap<Canvas, ChartHandle>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `chart` on `canvas`, destroying whatever was there. Returns
    /// `None` without touching the surface when the canvas is absent.
    pub fn replace<S: DashboardSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        canvas: Canvas,
        chart: &ChartSpec,
    ) -> Option<ChartHandle> {
        if !surface.has_canvas(canvas) {
            return None;
        }
        if let Some(previous) = self.bound.remove(&canvas) {
            surface.destroy_chart(previous);
        }
        let handle = surface.draw_chart(canvas, chart);
        self.bound.insert(canvas, handle);
        Some(handle)
    }

    pub fn bound(&self, canvas: Canvas) -> Option<ChartHandle> {
        self.bound.get(&canvas).copied()
    }
}
