//! Presentation side of the dashboard: the per-tick frame and its sinks.

use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::indicators::curve::{CurveIndicators, CurvePoint, CurveSnapshot};
use crate::indicators::summary::{format_indicator_summary, DisplayModel};

/// Chart series entry in x/y form, rendered as lines+markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: String,
    pub y: f64,
}

impl From<&CurvePoint> for SeriesPoint {
    fn from(p: &CurvePoint) -> Self {
        Self { x: p.maturity_symbol.clone(), y: p.yield_percent }
    }
}

/// Everything the UI needs for one refresh tick. Always a full re-render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFrame {
    pub tick: u64,
    pub timestamp: String,
    pub available: bool,
    pub series: Vec<SeriesPoint>,
    pub indicators: Option<CurveIndicators>,
    pub display: DisplayModel,
}

impl DashboardFrame {
    pub fn from_snapshot(tick: u64, snapshot: &CurveSnapshot) -> Self {
        let ind = &snapshot.indicators;
        Self {
            tick,
            timestamp: now_str(),
            available: true,
            series: snapshot.curve.iter().map(SeriesPoint::from).collect(),
            indicators: Some(ind.clone()),
            display: format_indicator_summary(ind.spread_2y10y, ind.trend, ind.fed_rate),
        }
    }

    /// Frame for a tick whose quotes could not be turned into a curve.
    pub fn unavailable(tick: u64, fed_rate: f64) -> Self {
        Self {
            tick,
            timestamp: now_str(),
            available: false,
            series: Vec::new(),
            indicators: None,
            display: DisplayModel::unavailable(fed_rate),
        }
    }
}

fn now_str() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// A sink that renders dashboard frames.
pub trait Presenter: Send + Sync {
    fn render(&self, frame: &DashboardFrame);
}

/// Writes each frame's indicator lines to the log.
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn render(&self, frame: &DashboardFrame) {
        let curve = frame
            .series
            .iter()
            .map(|p| format!("{}={:.3}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        info!(
            "📈 #{} {} | {} | {} | {}",
            frame.tick, curve, frame.display.spread_text, frame.display.trend_text, frame.display.fed_rate_text
        );
    }
}
