use std::fmt;

use serde::Serialize;

use crate::error::CurveError;
use crate::models::BondQuote;

/// Issuer prefix for U.S. Treasury symbols. Matched case-sensitively at position 0.
pub const US_PREFIX: &str = "US";
pub const US_2Y: &str = "US2Y";
pub const US_10Y: &str = "US10Y";

/// One point on the yield curve chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint {
    pub maturity_symbol: String,
    pub yield_percent: f64,
}

/// Sign of the 2s10s spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Steepening,
    Flattening,
    Flat,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Steepening => "Steepening",
            Trend::Flattening => "Flattening",
            Trend::Flat => "Flat",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveIndicators {
    /// `US10Y - US2Y`, `None` when either leg is missing.
    pub spread_2y10y: Option<f64>,
    pub trend: Option<Trend>,
    pub fed_rate: f64,
}

/// Everything derived from one quote snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSnapshot {
    pub curve: Vec<CurvePoint>,
    pub indicators: CurveIndicators,
}

/// Keeps U.S. quotes in input order and parses their yields.
///
/// Fails on the first retained quote whose price is not a percentage; a
/// partial curve is never returned.
pub fn extract_curve(quotes: &[BondQuote]) -> Result<Vec<CurvePoint>, CurveError> {
    quotes
        .iter()
        .filter(|q| q.symbol.starts_with(US_PREFIX))
        .map(|q| {
            Ok(CurvePoint {
                maturity_symbol: q.symbol.clone(),
                yield_percent: q.yield_percent()?,
            })
        })
        .collect()
}

/// 2s10s spread from the first `US2Y` and first `US10Y` quote.
///
/// `Ok(None)` means a leg is missing. A leg yielding exactly `0.00%` is present.
pub fn compute_spread(quotes: &[BondQuote]) -> Result<Option<f64>, CurveError> {
    let find = |symbol: &str| quotes.iter().find(|q| q.symbol == symbol);

    match (find(US_2Y), find(US_10Y)) {
        (Some(two), Some(ten)) => Ok(Some(ten.yield_percent()? - two.yield_percent()?)),
        _ => Ok(None),
    }
}

pub fn classify_trend(spread: Option<f64>) -> Option<Trend> {
    let spread = spread?;
    if spread > 0.0 {
        Some(Trend::Steepening)
    } else if spread < 0.0 {
        Some(Trend::Flattening)
    } else {
        Some(Trend::Flat)
    }
}

/// Stateless transformation from a raw quote list into the curve and its
/// indicators. The fed funds rate is configuration, not market data.
#[derive(Debug, Clone, Copy)]
pub struct CurveIndicatorCalculator {
    fed_rate: f64,
}

impl CurveIndicatorCalculator {
    pub fn new(fed_rate: f64) -> Self {
        Self { fed_rate }
    }

    pub fn fed_rate(&self) -> f64 {
        self.fed_rate
    }

    pub fn compute(&self, quotes: &[BondQuote]) -> Result<CurveSnapshot, CurveError> {
        let curve = extract_curve(quotes)?;
        let spread_2y10y = compute_spread(quotes)?;

        Ok(CurveSnapshot {
            curve,
            indicators: CurveIndicators {
                spread_2y10y,
                trend: classify_trend(spread_2y10y),
                fed_rate: self.fed_rate,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::percent::format_percent;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn q(symbol: &str, last: &str) -> BondQuote {
        BondQuote::new(symbol, last)
    }

    fn symbol() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(vec![
                "US2Y", "US10Y", "US3M", "US5Y", "US30Y", "DE2Y", "UK10Y", "JP10Y", "us2Y", "AUS10Y",
            ])
            .prop_map(String::from),
            "[A-Za-z]{0,3}[0-9]{1,2}[MY]",
        ]
    }

    fn quote() -> impl Strategy<Value = BondQuote> {
        (symbol(), -5.0f64..20.0).prop_map(|(s, y)| BondQuote::new(s, format_percent(y)))
    }

    proptest! {
        #[test]
        fn extract_keeps_only_us_quotes_in_input_order(
            quotes in prop::collection::vec(quote(), 0..24)
        ) {
            let curve = extract_curve(&quotes).unwrap();

            prop_assert!(curve.len() <= quotes.len());
            prop_assert!(curve.iter().all(|p| p.maturity_symbol.starts_with(US_PREFIX)));

            let expected: Vec<_> = quotes
                .iter()
                .filter(|q| q.symbol.starts_with(US_PREFIX))
                .map(|q| (q.symbol.clone(), q.yield_percent().unwrap()))
                .collect();
            let actual: Vec<_> = curve
                .iter()
                .map(|p| (p.maturity_symbol.clone(), p.yield_percent))
                .collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn spread_absent_when_a_leg_is_missing(
            quotes in prop::collection::vec(quote(), 0..24),
            drop_ten in any::<bool>(),
        ) {
            let missing = if drop_ten { US_10Y } else { US_2Y };
            let quotes: Vec<_> = quotes.into_iter().filter(|q| q.symbol != missing).collect();

            prop_assert_eq!(compute_spread(&quotes).unwrap(), None);
            prop_assert_eq!(classify_trend(compute_spread(&quotes).unwrap()), None);
        }

        #[test]
        fn spread_is_ten_year_minus_two_year(
            two in -5.0f64..20.0,
            ten in -5.0f64..20.0,
            rest in prop::collection::vec(quote(), 0..12),
        ) {
            let mut quotes = vec![q(US_10Y, &format_percent(ten)), q(US_2Y, &format_percent(two))];
            quotes.extend(rest);

            let spread = compute_spread(&quotes).unwrap().unwrap();
            prop_assert_eq!(spread, ten - two);
            prop_assert!(classify_trend(Some(spread)).is_some());
        }
    }

    #[test]
    fn extract_keeps_us_quotes_in_order() {
        let quotes = vec![q("US2Y", "4.5%"), q("XX1Y", "3.0%"), q("US10Y", "4.3%")];
        let curve = extract_curve(&quotes).unwrap();

        let symbols: Vec<_> = curve.iter().map(|p| p.maturity_symbol.as_str()).collect();
        assert_eq!(symbols, vec!["US2Y", "US10Y"]);
    }

    #[test]
    fn extract_prefix_is_case_sensitive() {
        let quotes = vec![q("us2Y", "4.5%"), q("AUS10Y", "4.0%"), q("US", "1.0%")];
        let curve = extract_curve(&quotes).unwrap();

        assert_eq!(curve.len(), 1);
        assert_eq!(curve[0].maturity_symbol, "US");
    }

    #[test]
    fn extract_empty_input() {
        assert!(extract_curve(&[]).unwrap().is_empty());
    }

    #[test]
    fn extract_fails_on_malformed_us_quote() {
        let quotes = vec![q("US2Y", "4.5%"), q("US5Y", "abc%")];
        let err = extract_curve(&quotes).unwrap_err();
        assert_eq!(
            err,
            CurveError::MalformedQuote { symbol: "US5Y".into(), raw: "abc%".into() }
        );
    }

    #[test]
    fn extract_ignores_malformed_foreign_quote() {
        let quotes = vec![q("DE2Y", "n/a"), q("US2Y", "4.5%")];
        assert_eq!(extract_curve(&quotes).unwrap().len(), 1);
    }

    #[test]
    fn spread_positive_and_negative() {
        let up = vec![q("US2Y", "2.00%"), q("US10Y", "4.00%")];
        let down = vec![q("US2Y", "4.00%"), q("US10Y", "2.00%")];

        assert_relative_eq!(compute_spread(&up).unwrap().unwrap(), 2.0);
        assert_relative_eq!(compute_spread(&down).unwrap().unwrap(), -2.0);
    }

    #[test]
    fn spread_absent_when_leg_missing() {
        assert_eq!(compute_spread(&[q("US2Y", "4.0%")]).unwrap(), None);
        assert_eq!(compute_spread(&[q("US10Y", "4.0%")]).unwrap(), None);
        assert_eq!(compute_spread(&[q("US5Y", "4.0%")]).unwrap(), None);
        assert_eq!(compute_spread(&[]).unwrap(), None);
    }

    #[test]
    fn spread_matches_symbols_exactly() {
        let quotes = vec![q("US2YR", "1.0%"), q("US10Y", "4.0%")];
        assert_eq!(compute_spread(&quotes).unwrap(), None);
    }

    #[test]
    fn zero_yield_is_not_missing() {
        let quotes = vec![q("US2Y", "0.00%"), q("US10Y", "1.25%")];
        assert_relative_eq!(compute_spread(&quotes).unwrap().unwrap(), 1.25);

        let both_zero = vec![q("US2Y", "0%"), q("US10Y", "0%")];
        assert_eq!(compute_spread(&both_zero).unwrap(), Some(0.0));
    }

    #[test]
    fn spread_uses_first_occurrence() {
        let quotes = vec![
            q("US2Y", "1.00%"),
            q("US10Y", "3.00%"),
            q("US2Y", "9.00%"),
            q("US10Y", "9.00%"),
        ];
        assert_relative_eq!(compute_spread(&quotes).unwrap().unwrap(), 2.0);
    }

    #[test]
    fn spread_fails_on_malformed_leg() {
        let quotes = vec![q("US2Y", "--"), q("US10Y", "4.0%")];
        assert!(matches!(compute_spread(&quotes), Err(CurveError::MalformedQuote { .. })));
    }

    #[test]
    fn trend_classification() {
        assert_eq!(classify_trend(Some(2.0)), Some(Trend::Steepening));
        assert_eq!(classify_trend(Some(-2.0)), Some(Trend::Flattening));
        assert_eq!(classify_trend(Some(0.0)), Some(Trend::Flat));
        assert_eq!(classify_trend(None), None);
    }

    #[test]
    fn calculator_end_to_end() {
        let quotes = vec![
            q("US2Y", "4.50%"),
            q("US5Y", "4.10%"),
            q("US10Y", "4.30%"),
            q("DE2Y", "2.90%"),
        ];
        let snapshot = CurveIndicatorCalculator::new(5.13).compute(&quotes).unwrap();

        let curve: Vec<_> = snapshot
            .curve
            .iter()
            .map(|p| (p.maturity_symbol.as_str(), p.yield_percent))
            .collect();
        assert_eq!(curve, vec![("US2Y", 4.50), ("US5Y", 4.10), ("US10Y", 4.30)]);

        let spread = snapshot.indicators.spread_2y10y.unwrap();
        assert_relative_eq!(spread, -0.20, epsilon = 1e-9);
        assert_eq!(snapshot.indicators.trend, Some(Trend::Flattening));
        assert_relative_eq!(snapshot.indicators.fed_rate, 5.13);
    }
}
