//! Single-shot fetch-and-paint of an [`AnalyticsReport`].

use chrono::{Datelike, FixedOffset, Local, NaiveDate};

use super::charts::{ChartRegistry, ChartSpec};
use super::client::{DashboardClient, FetchError};
use super::surface::{Canvas, DashboardSurface, Element, PageLink, TopPagesView};
use crate::locale::Locale;
use crate::report::{AnalyticsReport, TopPage};

pub struct DashboardRenderer<S> {
    surface: S,
    locale: Locale,
    offset: FixedOffset,
    charts: ChartRegistry,
}

impl<S: DashboardSurface> DashboardRenderer<S> {
    /// Timestamps are shown in the machine's current UTC offset.
    pub fn new(surface: S, locale: Locale) -> Self {
        Self::with_offset(surface, locale, *Local::now().offset())
    }

    pub fn with_offset(surface: S, locale: Locale, offset: FixedOffset) -> Self {
        Self {
            surface,
            locale,
            offset,
            charts: ChartRegistry::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    /// Fetch once and paint the result. Errors end up on the error panel;
    /// nothing is returned to the caller.
    pub async fn load(&mut self, client: &DashboardClient) {
        let outcome = client.fetch_report().await;
        let today = Local::now().date_naive();
        self.render_outcome(outcome, today);
    }

    pub fn render_outcome(&mut self, outcome: Result<AnalyticsReport, FetchError>, today: NaiveDate) {
        match outcome {
            Ok(report) => self.render_report(&report, today),
            Err(err) => {
                tracing::error!(error = %err, "Failed to load analytics data");
                self.show_error(&err.to_string());
            }
        }
    }

    pub fn show_error(&mut self, message: &str) {
        self.set_visible(Element::Loading, false);
        self.set_text(Element::ErrorPanel, message);
        self.set_visible(Element::ErrorPanel, true);
    }

    /// `today` drives the current month/year labels.
    pub fn render_report(&mut self, report: &AnalyticsReport, today: NaiveDate) {
        self.set_visible(Element::Loading, false);

        let updated = self
            .locale
            .format_timestamp(&report.last_update.with_timezone(&self.offset));
        let prefix = match self.locale {
            Locale::Es => "Actualizado",
            Locale::En => "Updated",
        };
        self.set_text(Element::LastUpdate, &format!("{prefix}: {updated}"));

        self.set_text(Element::TotalVisits, &self.locale.format_count(report.total_visits));
        self.set_text(
            Element::MonthlyVisits,
            &self.locale.format_count(report.monthly_visits),
        );
        self.set_text(Element::CurrentMonth, &self.locale.month_title(today.month0()));
        self.set_text(Element::CurrentYear, &today.year().to_string());

        self.render_top_pages(&report.top_pages);

        let locale = self.locale;
        self.draw(Canvas::DailyVisits, ChartSpec::daily_visits(&report.daily_visits, locale));
        self.draw(Canvas::Devices, ChartSpec::devices(&report.devices));
        self.draw(Canvas::Browsers, ChartSpec::browsers(&report.browsers));
        self.draw(
            Canvas::MonthlyTrend,
            ChartSpec::monthly_trend(&report.monthly_trend, locale),
        );
    }

    fn render_top_pages(&mut self, pages: &[TopPage]) {
        if !self.surface.has_element(Element::TopPages) {
            return;
        }
        let view = top_pages_view(pages, self.locale);
        self.surface.set_top_pages(&view);
    }

    fn draw(&mut self, canvas: Canvas, chart: ChartSpec) {
        self.charts.replace(&mut self.surface, canvas, &chart);
    }

    fn set_text(&mut self, element: Element, text: &str) {
        if self.surface.has_element(element) {
            self.surface.set_text(element, text);
        }
    }

    fn set_visible(&mut self, element: Element, visible: bool) {
        if self.surface.has_element(element) {
            self.surface.set_visible(element, visible);
        }
    }
}

pub fn top_pages_view(pages: &[TopPage], locale: Locale) -> TopPagesView {
    if pages.is_empty() {
        let message = match locale {
            Locale::Es => "No hay datos de páginas más visitadas.",
            Locale::En => "No top pages data available.",
        };
        return TopPagesView::Placeholder(message.to_string());
    }

    TopPagesView::Links(
        pages
            .iter()
            .map(|page| PageLink {
                href: page_href(&page.path),
                title: page.title.clone(),
                visits: locale.format_count(page.visits),
                new_tab: true,
            })
            .collect(),
    )
}

pub fn page_href(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
