//! Analysis pipeline.
//!
//! One request runs three stages over an immutable input: series
//! preparation, the scalar metric calculator, and the rolling volatility
//! profiler. The stages share no state between requests, so concurrent
//! analyses of different symbols need no coordination.

mod metrics;
mod volatility;

pub use metrics::{compute as compute_metrics, SeriesMetrics};
pub use volatility::{VolatilityProfile, VOLATILITY_SMA_WINDOW, VOLATILITY_WINDOW};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::series::PreparedSeries;
use crate::types::PriceBar;
use crate::Result;

/// Trading days per year. Annualization uses this fixed convention rather
/// than a calendar-aware count.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// The complete statistics bundle for one analyzed series.
///
/// Allocated once per request and returned by value; the date-indexed
/// vectors are the read views a renderer consumes, aligned position by
/// position with `dates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Instrument symbol the series belongs to
    pub symbol: String,
    /// Every scalar statistic
    pub metrics: SeriesMetrics,
    /// Date of each prepared bar, ascending
    pub dates: Vec<NaiveDate>,
    /// Adjusted close per date
    pub adj_close: Vec<f64>,
    /// Daily return per date
    pub daily_returns: Vec<f64>,
    /// Rolling volatility series and their extrema
    pub volatility: VolatilityProfile,
}

impl AnalysisReport {
    /// Ratio of the negative-day range to the positive-day range.
    ///
    /// # Errors
    ///
    /// `DivisionUndefined` when either side has no contributing days or
    /// the positive side is zero.
    pub fn range_ratio(&self) -> Result<f64> {
        self.metrics.range_ratio()
    }
}

/// Analyze a raw bar series: prepare it, then derive every statistic.
///
/// # Errors
///
/// Any preparation error (`EmptySeries`, `MissingField`,
/// `OutOfOrderInput`) or `InsufficientHistory` when the prepared series is
/// too short for the metric or rolling-window stages. On error no report
/// is produced at all; partial results are never returned.
pub fn analyze(symbol: &str, raw: &[PriceBar]) -> Result<AnalysisReport> {
    let series = PreparedSeries::from_bars(symbol, raw)?;
    analyze_prepared(&series)
}

/// Analyze an already prepared series.
pub fn analyze_prepared(series: &PreparedSeries) -> Result<AnalysisReport> {
    let metrics = metrics::compute(series)?;
    let volatility = VolatilityProfile::from_series(series)?;

    tracing::debug!(
        "analyzed {} over {} trading days",
        series.symbol(),
        metrics.trading_days
    );

    Ok(AnalysisReport {
        symbol: series.symbol().to_string(),
        metrics,
        dates: series.dates(),
        adj_close: series.adj_closes(),
        daily_returns: series.daily_returns(),
        volatility,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceBar;
    use crate::Error;
    use chrono::NaiveDate;

    fn raw_bars(n: usize) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                // A drifting, oscillating price path.
                let c = 100.0 + (i as f64) * 0.2 + ((i % 5) as f64 - 2.0);
                let date = start + chrono::Duration::days(i as i64);
                PriceBar::new(date, c, c + 1.0, c - 1.0, c, c)
            })
            .collect()
    }

    #[test]
    fn test_full_pipeline() {
        let raw = raw_bars(60);
        let report = analyze("SPY", &raw).unwrap();

        assert_eq!(report.symbol, "SPY");
        assert_eq!(report.metrics.trading_days, 59);
        assert_eq!(report.dates.len(), 59);
        assert_eq!(report.adj_close.len(), 59);
        assert_eq!(report.daily_returns.len(), 59);
        assert_eq!(report.volatility.dates, report.dates);
        assert!(report.metrics.max_drawdown_pct <= 0.0);
    }

    #[test]
    fn test_no_partial_report_on_short_series() {
        // Ten bars prepare fine but cannot fill the 14-day window.
        let result = analyze("SPY", &raw_bars(10));
        assert!(matches!(result, Err(Error::InsufficientHistory(_))));
    }

    #[test]
    fn test_report_serializes() {
        let report = analyze("SPY", &raw_bars(40)).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"symbol\":\"SPY\""));
        // Warm-up positions serialize as nulls.
        assert!(json.contains("null"));

        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metrics.trading_days, report.metrics.trading_days);
        assert_eq!(back.volatility.min_annualized, report.volatility.min_annualized);
    }
}
