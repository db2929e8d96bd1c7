//! Optional maturity ordering for the chart series.
//!
//! The data source returns bonds in its own order, which is not guaranteed to
//! be monotonic in maturity. Sorting is opt-in via `sort_by_tenor` in config.

use super::curve::{CurvePoint, US_PREFIX};

/// Tenor in months parsed from a maturity code: `US3M` -> 3, `US10Y` -> 120.
pub fn tenor_months(symbol: &str) -> Option<u32> {
    let code = symbol.strip_prefix(US_PREFIX).unwrap_or(symbol);
    let unit = code.chars().last()?;
    let count: u32 = code[..code.len() - unit.len_utf8()].parse().ok()?;

    match unit {
        'M' => Some(count),
        'Y' => count.checked_mul(12),
        _ => None,
    }
}

/// Stable sort by tenor; points whose tenor cannot be parsed keep their
/// relative order after all recognised ones.
pub fn sort_by_tenor(points: &mut [CurvePoint]) {
    points.sort_by_key(|p| tenor_months(&p.maturity_symbol).unwrap_or(u32::MAX));
}
