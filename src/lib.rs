// src/lib.rs

pub mod config;
pub mod error;
pub mod indicators;
pub mod models;
pub mod notifier;
pub mod presenter;
pub mod source;
pub mod telemetry;

use crate::config::MonitorConfig;
use crate::indicators::curve::{CurveIndicatorCalculator, Trend};
use crate::indicators::tenor::sort_by_tenor;
use crate::presenter::{DashboardFrame, Presenter};
use crate::source::DataSource;

use chrono::Local;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Tracks the last alerted trend and rate-limits change alerts.
///
/// A change suppressed by the cooldown stays pending and fires on the first
/// observation after the cooldown, unless the trend has returned to the
/// alerted one by then.
pub struct TrendWatch {
    alerted_trend: Option<Trend>,
    last_alert_time: Option<Instant>,
    cooldown: Duration,
}

impl TrendWatch {
    pub fn new(cooldown: Duration) -> Self {
        Self { alerted_trend: None, last_alert_time: None, cooldown }
    }

    /// Returns the last alerted trend when `trend` differs from it and an
    /// alert is due. The first observation only sets the baseline.
    pub fn observe(&mut self, trend: Trend, now: Instant) -> Option<Trend> {
        let Some(previous) = self.alerted_trend else {
            self.alerted_trend = Some(trend);
            return None;
        };
        if previous == trend {
            return None;
        }

        let needs_alert = match self.last_alert_time {
            None => true,
            Some(last) => now.duration_since(last) >= self.cooldown,
        };
        if !needs_alert {
            return None;
        }

        self.alerted_trend = Some(trend);
        self.last_alert_time = Some(now);
        Some(previous)
    }
}

/// Composition root: wires a quote source, the calculator and the
/// presenters together and drives them from a fixed-rate timer.
pub struct Dashboard<S: DataSource> {
    source: S,
    calculator: CurveIndicatorCalculator,
    presenters: Vec<Box<dyn Presenter>>,
    sort_by_tenor: bool,
    refresh_interval: Duration,
    slack_webhook_url: Option<String>,
    trend_watch: TrendWatch,
    tick_count: u64,
}

impl<S: DataSource> Dashboard<S> {
    pub fn new(source: S, cfg: &MonitorConfig) -> Self {
        Self {
            source,
            calculator: CurveIndicatorCalculator::new(cfg.fed_rate),
            presenters: Vec::new(),
            sort_by_tenor: cfg.sort_by_tenor,
            refresh_interval: Duration::from_millis(cfg.refresh_interval_ms),
            slack_webhook_url: cfg.slack_webhook_url.clone(),
            trend_watch: TrendWatch::new(Duration::from_secs(cfg.cooldown_secs)),
            tick_count: 0,
        }
    }

    pub fn with_presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenters.push(Box::new(presenter));
        self
    }

    /// One refresh cycle: fetch, compute, render.
    ///
    /// Returns `None` when the source could not be reached; nothing is
    /// rendered for that tick so the previous frame stays on screen.
    pub async fn tick(&mut self) -> Option<DashboardFrame> {
        self.tick_count += 1;
        let tick = self.tick_count;

        let quotes = match self.source.bonds().await {
            Ok(q) => q,
            Err(e) => {
                warn!("⚠️ Tick #{} skipped, quote fetch failed: {}", tick, e);
                return None;
            }
        };

        let frame = match self.calculator.compute(&quotes) {
            Ok(mut snapshot) => {
                if self.sort_by_tenor {
                    sort_by_tenor(&mut snapshot.curve);
                }
                if let (Some(trend), Some(spread)) = (snapshot.indicators.trend, snapshot.indicators.spread_2y10y) {
                    self.on_trend(trend, spread);
                }
                DashboardFrame::from_snapshot(tick, &snapshot)
            }
            Err(e) => {
                warn!("⚠️ Tick #{}: {}", tick, e);
                DashboardFrame::unavailable(tick, self.calculator.fed_rate())
            }
        };

        for presenter in &self.presenters {
            presenter.render(&frame);
        }
        Some(frame)
    }

    fn on_trend(&mut self, trend: Trend, spread: f64) {
        let Some(previous) = self.trend_watch.observe(trend, Instant::now()) else {
            return;
        };

        warn!("🌊 Curve trend changed: {} -> {} (2s10s {:+.2}%)", previous, trend, spread);

        if let Some(url) = &self.slack_webhook_url {
            let time_str = Local::now().format("%H:%M:%S").to_string();
            let message = notifier::format_trend_alert(previous, trend, spread, self.calculator.fed_rate(), &time_str);
            notifier::send_trend_alert(url.clone(), message);
        }
    }

    /// Refreshes forever at the configured interval. Ticks never overlap;
    /// a slow fetch causes missed ticks to be dropped.
    pub async fn run(mut self) {
        let mut interval = time::interval(self.refresh_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            "✅ Dashboard running (refresh: {:?}, fed rate: {:.2}%)",
            self.refresh_interval,
            self.calculator.fed_rate()
        );

        loop {
            interval.tick().await;
            self.tick().await;
        }
    }
}
