use tracing::{info, error};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use yield_curve_monitor::config::MonitorConfig;
use yield_curve_monitor::presenter::ConsolePresenter;
use yield_curve_monitor::source::CnbcBondSource;
use yield_curve_monitor::telemetry::TelemetryServer;
use yield_curve_monitor::Dashboard;

/// Formats log timestamps in the system's local timezone instead of UTC.
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Local::now();
        write!(w, "{}", now.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

#[tokio::main]
async fn main() {
    // RUST_LOG controls the level, "info" if unset.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(LocalTimer)
        .init();

    // Fail fast: without a valid config there is nothing to run.
    let cfg = match MonitorConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("❌ Critical Error: Failed to load configuration: {}", e);
            return;
        }
    };

    let source = match CnbcBondSource::new(&cfg.source) {
        Ok(s) => s,
        Err(e) => {
            error!("❌ Critical Error: Failed to build HTTP client: {}", e);
            return;
        }
    };

    info!("🚀 Starting Treasury Yield Curve Monitor ({} symbols)...", cfg.source.symbols.len());

    let telemetry = TelemetryServer::start(&cfg.telemetry).await;

    Dashboard::new(source, &cfg)
        .with_presenter(ConsolePresenter)
        .with_presenter(telemetry)
        .run()
        .await;
}
