//! Rolling volatility profile of a prepared series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::TRADING_DAYS_PER_YEAR;
use crate::series::PreparedSeries;
use crate::stats;
use crate::types::VolatilityExtreme;
use crate::{Error, Result};

/// Trailing window of the historic-volatility estimate, in trading days.
pub const VOLATILITY_WINDOW: usize = 14;

/// Trailing window of the moving average over the annualized series.
pub const VOLATILITY_SMA_WINDOW: usize = 126;

/// Time-indexed rolling volatility: the 14-day historic estimate, its
/// annualized transform, and a 126-point moving average of the annualized
/// series, all aligned to the prepared series' dates.
///
/// `None` marks warm-up positions where the trailing window has
/// insufficient history: the first 13 positions of the rolling series, and
/// the first 138 of the moving average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityProfile {
    /// Date of every position, ascending
    pub dates: Vec<NaiveDate>,
    /// 14-day rolling sample std of daily returns, percent
    pub historic_14d: Vec<Option<f64>>,
    /// Historic volatility scaled by sqrt(252), percent
    pub annualized_14d: Vec<Option<f64>>,
    /// 126-point simple moving average of the annualized series, percent
    pub sma_126: Vec<Option<f64>>,
    /// Series-wide minimum of the annualized series
    pub min_annualized: VolatilityExtreme,
    /// Series-wide maximum of the annualized series
    pub max_annualized: VolatilityExtreme,
}

impl VolatilityProfile {
    /// Profile the rolling volatility of a prepared series.
    ///
    /// # Errors
    ///
    /// `InsufficientHistory` if the series is shorter than the 14-day
    /// window, i.e. every annualized value would be undefined and no
    /// extremum exists.
    pub fn from_series(series: &PreparedSeries) -> Result<Self> {
        let returns = series.daily_returns();
        let dates = series.dates();

        let historic_14d: Vec<Option<f64>> =
            stats::rolling_sample_std(&returns, VOLATILITY_WINDOW)
                .into_iter()
                .map(|v| v.map(|s| s * 100.0))
                .collect();

        let annualized_14d: Vec<Option<f64>> = historic_14d
            .iter()
            .map(|v| v.map(|s| s * TRADING_DAYS_PER_YEAR.sqrt()))
            .collect();

        let sma_126 = stats::rolling_mean(&annualized_14d, VOLATILITY_SMA_WINDOW);

        let (min_annualized, max_annualized) = extrema(&dates, &annualized_14d)?;

        Ok(Self {
            dates,
            historic_14d,
            annualized_14d,
            sma_126,
            min_annualized,
            max_annualized,
        })
    }
}

/// Locate the first-dated minimum and maximum of the annualized series,
/// skipping warm-up positions. Ties keep the earliest date.
fn extrema(
    dates: &[NaiveDate],
    annualized: &[Option<f64>],
) -> Result<(VolatilityExtreme, VolatilityExtreme)> {
    let mut min: Option<VolatilityExtreme> = None;
    let mut max: Option<VolatilityExtreme> = None;

    for (date, value) in dates.iter().zip(annualized) {
        let value = match value {
            Some(v) => *v,
            None => continue,
        };
        match &mut min {
            Some(m) if value >= m.value => {}
            _ => min = Some(VolatilityExtreme { date: *date, value }),
        }
        match &mut max {
            Some(m) if value <= m.value => {}
            _ => max = Some(VolatilityExtreme { date: *date, value }),
        }
    }

    match (min, max) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(Error::InsufficientHistory(format!(
            "rolling volatility needs at least {} daily returns, got {}",
            VOLATILITY_WINDOW,
            annualized.len()
        ))),
    }
}
