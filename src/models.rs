//! CNBC quote web service data models.
//!
//! Only the fields the curve needs are decoded; the service sends many more
//! (change, open, high, low, timestamps) which serde ignores.

use serde::Deserialize;

use crate::error::CurveError;
use crate::indicators::percent::parse_percent;

/// A single bond quote as published by the data source.
///
/// # Fields
/// - `symbol`: issuer prefix plus maturity code, e.g. `US10Y`, `DE2Y`
/// - `last_price`: percentage-formatted yield, e.g. `" 4.27% "`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BondQuote {
    pub symbol: String,
    #[serde(rename = "last", default)]
    pub last_price: String,
}

impl BondQuote {
    pub fn new(symbol: impl Into<String>, last_price: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            last_price: last_price.into(),
        }
    }

    /// Parses `last_price` into a yield in percent.
    pub fn yield_percent(&self) -> Result<f64, CurveError> {
        parse_percent(&self.last_price).ok_or_else(|| CurveError::MalformedQuote {
            symbol: self.symbol.clone(),
            raw: self.last_price.clone(),
        })
    }
}

/// Top-level response envelope: `{"FormattedQuoteResult": {"FormattedQuote": ...}}`
#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    #[serde(rename = "FormattedQuoteResult")]
    pub result: FormattedQuoteResult,
}

#[derive(Debug, Deserialize)]
pub struct FormattedQuoteResult {
    #[serde(rename = "FormattedQuote", default)]
    pub quotes: OneOrMany<BondQuote>,
}

/// The service returns a bare object instead of an array when only one
/// symbol was requested.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}
