//! Error types for curve computation and quote fetching.

use thiserror::Error;

/// Failure while turning a quote list into a curve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A retained quote's `last` field is not a percentage-decimal.
    #[error("Malformed quote for {symbol}: {raw:?} is not a percentage")]
    MalformedQuote {
        /// Symbol of the offending quote.
        symbol: String,
        /// Raw `last` text as received.
        raw: String,
    },
}

/// Failure while fetching quotes from the data source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Data source returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to decode quote response: {0}")]
    Decode(#[from] serde_json::Error),
}
