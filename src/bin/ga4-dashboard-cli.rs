use anyhow::Result;
use clap::Parser;
use ga4_dashboard::dashboard::{
    Canvas, DashboardClient, DashboardRenderer, Element, TerminalSurface,
};
use ga4_dashboard::locale::Locale;

#[derive(Parser)]
#[command(name = "ga4-dashboard-cli")]
#[command(about = "Print the GA4 traffic dashboard in the terminal", long_about = None)]
struct Cli {
    /// Aggregator endpoint to fetch the report from
    #[arg(long, env = "DASHBOARD_URL", default_value = "http://127.0.0.1:8080/get-analytics")]
    url: String,

    /// Label and number formatting (es, en)
    #[arg(long, env = "DASHBOARD_LOCALE", default_value = "es")]
    locale: Locale,

    /// Only print the summary and top pages
    #[arg(long)]
    no_charts: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = DashboardClient::new(cli.url, cli.locale)?;

    let mut surface = TerminalSurface::new();
    if cli.no_charts {
        for canvas in Canvas::ALL {
            surface = surface.without_canvas(canvas);
        }
    }

    let mut renderer = DashboardRenderer::new(surface, cli.locale);
    renderer.load(&client).await;
    print!("{}", renderer.surface().render());

    if renderer.surface().is_visible(Element::ErrorPanel) {
        std::process::exit(1);
    }

    Ok(())
}
