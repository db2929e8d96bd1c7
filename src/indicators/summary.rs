use serde::Serialize;

use super::curve::Trend;

pub const NOT_AVAILABLE: &str = "Data not available";

/// Color cue for the spread figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorHint {
    Positive,
    Negative,
    Neutral,
}

impl ColorHint {
    /// Positive spread is one color, negative another, zero or absent neutral.
    pub fn from_value(value: Option<f64>) -> Self {
        match value {
            Some(v) if v > 0.0 => ColorHint::Positive,
            Some(v) if v < 0.0 => ColorHint::Negative,
            _ => ColorHint::Neutral,
        }
    }

    pub fn css_color(&self) -> &'static str {
        match self {
            ColorHint::Positive => "green",
            ColorHint::Negative => "red",
            ColorHint::Neutral => "gray",
        }
    }
}

/// Labels handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModel {
    pub spread_text: String,
    pub trend_text: String,
    pub fed_rate_text: String,
    pub color: ColorHint,
    pub css_color: &'static str,
}

impl DisplayModel {
    /// Shown when the tick's computation failed.
    pub fn unavailable(fed_rate: f64) -> Self {
        format_indicator_summary(None, None, fed_rate)
    }
}

pub fn format_indicator_summary(spread: Option<f64>, trend: Option<Trend>, fed_rate: f64) -> DisplayModel {
    let spread_text = match spread {
        // + 0.0 turns -0.0 into 0.0
        Some(s) => format!("2-Year to 10-Year Slope: {:.2}%", s + 0.0),
        None => NOT_AVAILABLE.to_string(),
    };
    let trend_text = match trend {
        Some(t) => format!("Curve Trend: {}", t),
        None => NOT_AVAILABLE.to_string(),
    };
    let color = ColorHint::from_value(spread);

    DisplayModel {
        spread_text,
        trend_text,
        fed_rate_text: format!("Fed Funds Rate: {:.2}%", fed_rate),
        color,
        css_color: color.css_color(),
    }
}
