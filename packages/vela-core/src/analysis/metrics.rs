//! Scalar metrics over a prepared series.

use serde::{Deserialize, Serialize};

use crate::analysis::TRADING_DAYS_PER_YEAR;
use crate::series::PreparedSeries;
use crate::stats;
use crate::{Error, Result};

/// Lower-tail probabilities for the 95 / 99 / 99.7% confidence levels.
const VAR_TAILS: [f64; 3] = [0.05, 0.01, 0.003];

/// The scalar statistics of one analyzed series.
///
/// Every field is a pure function of the prepared series. NaN values mark
/// legitimately degenerate statistics (for example the moments of a
/// zero-variance return distribution, or a day-range mean with no
/// contributing days) and are reported as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetrics {
    /// Number of daily returns analyzed
    pub trading_days: usize,
    /// Trading years represented by the series (N / 252)
    pub trading_years: f64,
    /// Compound annual growth rate, percent
    pub cagr_pct: f64,
    /// Buy-and-hold return over the whole series, percent
    pub buy_and_hold_pct: f64,
    /// Largest decline from the running peak, percent (<= 0)
    pub max_drawdown_pct: f64,
    /// Mean daily return, percent
    pub mean_daily_return_pct: f64,
    /// Sample standard deviation of daily returns, percent
    pub std_daily_return_pct: f64,
    /// Worst daily return, percent
    pub min_daily_return_pct: f64,
    /// Best daily return, percent
    pub max_daily_return_pct: f64,
    /// Bias-corrected sample skewness of daily returns
    pub skewness: f64,
    /// Bias-corrected sample excess kurtosis of daily returns
    pub kurtosis: f64,
    /// Mean of the maximum-likelihood normal fit
    pub fit_mean: f64,
    /// Sigma of the maximum-likelihood normal fit (population denominator)
    pub fit_std: f64,
    /// Gaussian VaR at 95% confidence, percent (a loss, so negative)
    pub var_gaussian_95_pct: f64,
    /// Gaussian VaR at 99% confidence, percent
    pub var_gaussian_99_pct: f64,
    /// Gaussian VaR at 99.7% confidence, percent
    pub var_gaussian_99_7_pct: f64,
    /// Empirical VaR at 95% confidence, percent
    pub var_historic_95_pct: f64,
    /// Empirical VaR at 99% confidence, percent
    pub var_historic_99_pct: f64,
    /// Empirical VaR at 99.7% confidence, percent
    pub var_historic_99_7_pct: f64,
    /// Annualized volatility (sample std x sqrt(252)), percent
    pub annualized_volatility_pct: f64,
    /// Mean high-low range on negative-return days, percent; NaN if no
    /// such day contributes
    pub negative_day_range_pct: f64,
    /// Mean high-low range on positive-return days, percent; NaN if no
    /// such day contributes
    pub positive_day_range_pct: f64,
}

impl SeriesMetrics {
    /// Ratio of the negative-day range to the positive-day range.
    ///
    /// # Errors
    ///
    /// `DivisionUndefined` when the positive-day range is zero or either
    /// side has no contributing days.
    pub fn range_ratio(&self) -> Result<f64> {
        let dn = self.negative_day_range_pct;
        let dp = self.positive_day_range_pct;
        if !dn.is_finite() || !dp.is_finite() || dp == 0.0 {
            return Err(Error::DivisionUndefined(format!(
                "negative/positive day-range ratio needs both sides populated (DN={}, DP={})",
                dn, dp
            )));
        }
        Ok(dn / dp)
    }
}

/// Compute every scalar metric from a prepared series.
///
/// # Errors
///
/// `InsufficientHistory` if the series has fewer than 2 daily returns.
pub fn compute(series: &PreparedSeries) -> Result<SeriesMetrics> {
    let returns = series.daily_returns();
    let n = returns.len();
    if n < 2 {
        return Err(Error::InsufficientHistory(format!(
            "need at least 2 daily returns, got {}",
            n
        )));
    }

    let years = n as f64 / TRADING_DAYS_PER_YEAR;
    if years <= 0.0 {
        return Err(Error::InsufficientHistory(
            "trading-year count must be positive".to_string(),
        ));
    }

    let bars = series.bars();
    let first = bars[0].adj_close;
    let last = bars[n - 1].adj_close;

    let cagr_pct = ((last / first).powf(1.0 / years) - 1.0) * 100.0;
    let buy_and_hold_pct = (last - first) / first * 100.0;

    // Drawdown against the running peak of the adjusted close.
    let mut peak = f64::NEG_INFINITY;
    let mut max_drawdown_pct: f64 = 0.0;
    for bar in bars {
        peak = peak.max(bar.adj_close);
        let drawdown = (bar.adj_close - peak) / peak * 100.0;
        max_drawdown_pct = max_drawdown_pct.min(drawdown);
    }

    let fit_mean = stats::mean(&returns);
    let fit_std = stats::population_std(&returns);
    let sample_std = stats::sample_std(&returns);

    let min_return = returns.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_return = returns.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let var_gaussian: Vec<f64> = VAR_TAILS
        .iter()
        .map(|&q| (fit_mean + fit_std * stats::norm_ppf(q)) * 100.0)
        .collect();
    let var_historic: Vec<f64> = VAR_TAILS
        .iter()
        .map(|&q| stats::percentile(&returns, q * 100.0) * 100.0)
        .collect();

    // Day ranges. A day only contributes to a side when its return has the
    // matching sign AND its high-low range is non-zero; zero-return and
    // zero-range days are excluded from both sides.
    let mut negative_ranges = Vec::new();
    let mut positive_ranges = Vec::new();
    for bar in bars {
        let range = 100.0 * (bar.high - bar.low) / bar.low;
        if range == 0.0 {
            continue;
        }
        if bar.daily_return < 0.0 {
            negative_ranges.push(range);
        } else if bar.daily_return > 0.0 {
            positive_ranges.push(range);
        }
    }

    Ok(SeriesMetrics {
        trading_days: n,
        trading_years: years,
        cagr_pct,
        buy_and_hold_pct,
        max_drawdown_pct,
        mean_daily_return_pct: fit_mean * 100.0,
        std_daily_return_pct: sample_std * 100.0,
        min_daily_return_pct: min_return * 100.0,
        max_daily_return_pct: max_return * 100.0,
        skewness: stats::skewness(&returns),
        kurtosis: stats::excess_kurtosis(&returns),
        fit_mean,
        fit_std,
        var_gaussian_95_pct: var_gaussian[0],
        var_gaussian_99_pct: var_gaussian[1],
        var_gaussian_99_7_pct: var_gaussian[2],
        var_historic_95_pct: var_historic[0],
        var_historic_99_pct: var_historic[1],
        var_historic_99_7_pct: var_historic[2],
        annualized_volatility_pct: sample_std * 100.0 * TRADING_DAYS_PER_YEAR.sqrt(),
        negative_day_range_pct: stats::mean(&negative_ranges),
        positive_day_range_pct: stats::mean(&positive_ranges),
    })
}
