//! Bond quote sources.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::models::{BondQuote, QuoteResponse};

/// Produces a fresh snapshot of bond quotes for a fixed instrument universe.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn bonds(&self) -> Result<Vec<BondQuote>, SourceError>;
}

/// Polls the CNBC quote web service.
pub struct CnbcBondSource {
    client: reqwest::Client,
    url: String,
    symbols: String,
}

impl CnbcBondSource {
    pub fn new(cfg: &SourceConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: cfg.url.clone(),
            symbols: cfg.symbols.join("|"),
        })
    }

    fn query(&self) -> [(&str, &str); 7] {
        [
            ("symbols", self.symbols.as_str()),
            ("requestMethod", "itv"),
            ("noform", "1"),
            ("partnerId", "2"),
            ("fund", "1"),
            ("exthrs", "1"),
            ("output", "json"),
        ]
    }
}

#[async_trait]
impl DataSource for CnbcBondSource {
    async fn bonds(&self) -> Result<Vec<BondQuote>, SourceError> {
        let resp = self.client.get(&self.url).query(&self.query()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body = resp.text().await?;
        let parsed: QuoteResponse = serde_json::from_str(&body)?;
        let quotes = parsed.result.quotes.into_vec();

        debug!("Fetched {} bond quotes", quotes.len());
        Ok(quotes)
    }
}
