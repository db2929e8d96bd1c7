use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_SOURCE_URL: &str =
    "https://quote.cnbc.com/quote-html-webservice/restQuote/symbolType/symbol";

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_telemetry_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    /// Static fed funds reference rate, in percent.
    #[serde(default = "default_fed_rate")]
    pub fed_rate: f64,

    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// Order the chart by maturity instead of source order.
    #[serde(default)]
    pub sort_by_tenor: bool,

    // Trend-change alerts are skipped when no webhook is configured.
    #[serde(default)]
    pub slack_webhook_url: Option<String>,
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    #[serde(default = "default_source")]
    pub source: SourceConfig,
    #[serde(default = "default_telemetry")]
    pub telemetry: TelemetryConfig,
}

fn default_fed_rate() -> f64 { 5.13 }
fn default_refresh_interval_ms() -> u64 { 1000 }
fn default_cooldown_secs() -> u64 { 300 }
fn default_source_url() -> String { DEFAULT_SOURCE_URL.to_string() }
fn default_timeout_secs() -> u64 { 5 }
fn default_telemetry_port() -> u16 { 8765 }

fn default_symbols() -> Vec<String> {
    ["US1M", "US3M", "US6M", "US1Y", "US2Y", "US5Y", "US10Y", "US30Y", "UK10Y", "DE10Y", "JP10Y"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_source() -> SourceConfig {
    SourceConfig {
        url: default_source_url(),
        symbols: default_symbols(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_telemetry() -> TelemetryConfig {
    TelemetryConfig { enabled: false, port: default_telemetry_port() }
}

impl MonitorConfig {
    /// Loads configuration from the 'config.yaml' file in the current working directory.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from("config.yaml")
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let yaml_content = fs::read_to_string(path)
            .map_err(|e| format!("❌ Failed to read {}: {}", path.display(), e))?;

        Self::from_yaml(&yaml_content)
    }

    pub fn from_yaml(yaml_content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: MonitorConfig = serde_yaml::from_str(yaml_content)
            .map_err(|e| format!("❌ Failed to parse config: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.fed_rate.is_finite() {
            return Err("❌ fed_rate must be a finite number".into());
        }
        if self.refresh_interval_ms == 0 {
            return Err("❌ refresh_interval_ms must be greater than zero".into());
        }
        if self.source.symbols.is_empty() {
            return Err("❌ source.symbols is empty!".into());
        }
        if let Some(url) = &self.slack_webhook_url {
            if url.is_empty() {
                return Err("❌ slack_webhook_url is set but empty!".into());
            }
        }
        Ok(())
    }
}
