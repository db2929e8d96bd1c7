/// Parses a percentage-formatted field such as `" 4.27% "` into `4.27`.
///
/// Every `%` is removed and surrounding whitespace trimmed before parsing.
/// Returns `None` for anything that is not a finite decimal, including the
/// `NaN` / `inf` spellings `f64::from_str` would otherwise accept.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let cleaned = raw.replace('%', "");
    let value: f64 = cleaned.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Renders a yield so that `parse_percent` recovers the exact value.
pub fn format_percent(value: f64) -> String {
    format!("{}%", value)
}
