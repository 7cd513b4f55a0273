//! Plain-text dashboard surface for the CLI.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::charts::{ChartKind, ChartSpec};
use super::surface::{Canvas, ChartHandle, DashboardSurface, Element, TopPagesView};

const BAR_WIDTH: usize = 40;

pub struct TerminalSurface {
    missing_canvases: BTreeSet<Canvas>,
    texts: BTreeMap<Element, String>,
    hidden: BTreeSet<Element>,
    top_pages: Option<TopPagesView>,
    charts: BTreeMap<Canvas, (ChartHandle, ChartSpec)>,
    next_handle: u64,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSurface {
    /// All elements present; the error panel and charts start hidden/empty.
    pub fn new() -> Self {
        let mut hidden = BTreeSet::new();
        hidden.insert(Element::ErrorPanel);
        Self {
            missing_canvases: BTreeSet::new(),
            texts: BTreeMap::new(),
            hidden,
            top_pages: None,
            charts: BTreeMap::new(),
            next_handle: 1,
        }
    }

    /// Drop a canvas, e.g. when the terminal is too narrow for charts.
    pub fn without_canvas(mut self, canvas: Canvas) -> Self {
        self.missing_canvases.insert(canvas);
        self
    }

    pub fn text(&self, element: Element) -> Option<&str> {
        self.texts.get(&element).map(String::as_str)
    }

    pub fn is_visible(&self, element: Element) -> bool {
        !self.hidden.contains(&element)
    }

    pub fn chart(&self, canvas: Canvas) -> Option<&ChartSpec> {
        self.charts.get(&canvas).map(|(_, spec)| spec)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TerminalSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_visible(Element::ErrorPanel) {
            return writeln!(f, "! {}", self.text(Element::ErrorPanel).unwrap_or_default());
        }
        if self.is_visible(Element::Loading) {
            return writeln!(f, "…");
        }

        if let Some(updated) = self.text(Element::LastUpdate) {
            writeln!(f, "{updated}\n")?;
        }
        let period = format!(
            "{} {}",
            self.text(Element::CurrentMonth).unwrap_or_default(),
            self.text(Element::CurrentYear).unwrap_or_default()
        );
        writeln!(
            f,
            "Total: {:>14}",
            self.text(Element::TotalVisits).unwrap_or("-")
        )?;
        writeln!(
            f,
            "Month: {:>14}   ({})\n",
            self.text(Element::MonthlyVisits).unwrap_or("-"),
            period.trim()
        )?;

        match &self.top_pages {
            Some(TopPagesView::Placeholder(message)) => writeln!(f, "{message}\n")?,
            Some(TopPagesView::Links(links)) => {
                for (rank, link) in links.iter().enumerate() {
                    writeln!(
                        f,
                        "{:>2}. {:<48} {:>10}  {}",
                        rank + 1,
                        truncate(&link.title, 48),
                        link.visits,
                        link.href
                    )?;
                }
                writeln!(f)?;
            }
            None => {}
        }

        for (canvas, (_, chart)) in &self.charts {
            write_chart(f, *canvas, chart)?;
        }
        Ok(())
    }
}

impl DashboardSurface for TerminalSurface {
    fn has_element(&self, _element: Element) -> bool {
        true
    }

    fn set_text(&mut self, element: Element, text: &str) {
        self.texts.insert(element, text.to_string());
    }

    fn set_visible(&mut self, element: Element, visible: bool) {
        if visible {
            self.hidden.remove(&element);
        } else {
            self.hidden.insert(element);
        }
    }

    fn set_top_pages(&mut self, view: &TopPagesView) {
        self.top_pages = Some(view.clone());
    }

    fn has_canvas(&self, canvas: Canvas) -> bool {
        !self.missing_canvases.contains(&canvas)
    }

    fn draw_chart(&mut self, canvas: Canvas, chart: &ChartSpec) -> ChartHandle {
        let handle = ChartHandle(self.next_handle);
        self.next_handle += 1;
        self.charts.insert(canvas, (handle, chart.clone()));
        handle
    }

    fn destroy_chart(&mut self, handle: ChartHandle) {
        self.charts.retain(|_, (bound, _)| *bound != handle);
    }
}

fn write_chart(f: &mut fmt::Formatter<'_>, canvas: Canvas, chart: &ChartSpec) -> fmt::Result {
    let heading = chart
        .title
        .clone()
        .unwrap_or_else(|| format!("{canvas:?}"));
    writeln!(f, "── {heading} ──")?;
    if chart.is_empty() {
        return writeln!(f, "   (no data)\n");
    }

    let total: u64 = chart.values.iter().sum();
    let max = chart.values.iter().copied().max().unwrap_or(0);
    let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    for (label, value) in chart.labels.iter().zip(&chart.values) {
        let bar = bar_length(*value, max);
        let share = match chart.kind {
            ChartKind::Pie | ChartKind::Doughnut if total > 0 => {
                format!(" {:>5.1}%", *value as f64 * 100.0 / total as f64)
            }
            _ => String::new(),
        };
        writeln!(
            f,
            "{label:<label_width$} │{} {value}{share}",
            "█".repeat(bar)
        )?;
    }
    writeln!(f)
}

fn bar_length(value: u64, max: u64) -> usize {
    if max == 0 {
        return 0;
    }
    ((value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
