//! Data-source collaborator contract.
//!
//! The core never talks to a market-data provider itself. Retrieval,
//! authentication, and response parsing live behind [`DailyBarSource`];
//! the analytics only ever see the returned bar sequence.

use chrono::NaiveDate;

use crate::analysis::{self, AnalysisReport};
use crate::types::{AnalysisRequest, PriceBar};
use crate::Result;

/// A provider of raw daily bars for one instrument.
pub trait DailyBarSource {
    /// Fetch the raw daily bars for `symbol` over `[from, to]` inclusive,
    /// date-ascending. Bars may contain duplicate dates or missing fields;
    /// series preparation deals with both.
    fn fetch_daily(&self, symbol: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<PriceBar>>;
}

/// Fetch a series from the collaborator and analyze it in one step.
pub fn analyze_symbol<S: DailyBarSource>(
    source: &S,
    request: &AnalysisRequest,
) -> Result<AnalysisReport> {
    let bars = source.fetch_daily(&request.symbol, request.from, request.to)?;
    analysis::analyze(&request.symbol, &bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An in-memory source standing in for a provider adapter.
    struct FixedSource {
        bars: Vec<PriceBar>,
    }

    impl DailyBarSource for FixedSource {
        fn fetch_daily(
            &self,
            _symbol: &str,
            from: NaiveDate,
            to: NaiveDate,
        ) -> Result<Vec<PriceBar>> {
            Ok(self
                .bars
                .iter()
                .filter(|b| b.date >= from && b.date <= to)
                .cloned()
                .collect())
        }
    }

    #[test]
    fn test_analyze_symbol_runs_pipeline() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let bars: Vec<PriceBar> = (0..40)
            .map(|i| {
                let c = 100.0 + (i as f64) * 0.3 + ((i % 4) as f64);
                let date = start + chrono::Duration::days(i as i64);
                PriceBar::new(date, c, c + 1.0, c - 1.0, c, c)
            })
            .collect();
        let source = FixedSource { bars };

        let request = AnalysisRequest::new(
            "spy",
            start,
            start + chrono::Duration::days(39),
        )
        .unwrap();
        let report = analyze_symbol(&source, &request).unwrap();
        assert_eq!(report.symbol, "SPY");
        assert_eq!(report.metrics.trading_days, 39);
    }

    #[test]
    fn test_analyze_symbol_propagates_short_range() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let source = FixedSource { bars: Vec::new() };
        let request = AnalysisRequest::new("spy", start, start).unwrap();
        assert!(analyze_symbol(&source, &request).is_err());
    }
}
