//! What the renderer draws onto.

use super::charts::ChartSpec;

/// Named display elements. Any of them may be missing from a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Loading,
    ErrorPanel,
    LastUpdate,
    TotalVisits,
    MonthlyVisits,
    CurrentMonth,
    CurrentYear,
    TopPages,
}

/// Chart canvases. Any of them may be missing from a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Canvas {
    DailyVisits,
    Devices,
    Browsers,
    MonthlyTrend,
}

impl Canvas {
    pub const ALL: [Canvas; 4] = [
        Canvas::DailyVisits,
        Canvas::Devices,
        Canvas::Browsers,
        Canvas::MonthlyTrend,
    ];
}

/// Identifies a chart instance drawn by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Always starts with `/`
    pub href: String,
    pub title: String,
    pub visits: String,
    pub new_tab: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopPagesView {
    Placeholder(String),
    Links(Vec<PageLink>),
}

pub trait DashboardSurface {
    fn has_element(&self, element: Element) -> bool;

    fn set_text(&mut self, element: Element, text: &str);

    fn set_visible(&mut self, element: Element, visible: bool);

    fn set_top_pages(&mut self, view: &TopPagesView);

    fn has_canvas(&self, canvas: Canvas) -> bool;

    fn draw_chart(&mut self, canvas: Canvas, chart: &ChartSpec) -> ChartHandle;

    fn destroy_chart(&mut self, handle: ChartHandle);
}
