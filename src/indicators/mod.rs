//! Yield curve indicator module
//!
//! - `percent`: percentage field parsing
//! - `curve`: curve extraction, 2s10s spread, trend classification
//! - `tenor`: optional maturity ordering
//! - `summary`: display labels and color hint

pub mod percent;
pub mod curve;
pub mod tenor;
pub mod summary;
