//! Series preparation: ordering checks, deduplication, and daily returns.
//!
//! Every downstream statistic operates on a [`PreparedSeries`]; preparation
//! is the only place raw provider data is validated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::PriceBar;
use crate::{Error, Result};

/// One prepared observation: a bar that survived deduplication together
/// with its simple daily return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnBar {
    /// Observation date
    pub date: NaiveDate,
    /// Intraday high
    pub high: f64,
    /// Intraday low
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Adjusted closing price
    pub adj_close: f64,
    /// Simple return on adjusted close versus the previous surviving bar
    pub daily_return: f64,
}

/// A deduplicated, date-ascending daily series with derived returns.
///
/// The first raw bar has no predecessor and therefore no return, so it is
/// dropped: a prepared series is exactly one bar shorter than its
/// deduplicated input. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedSeries {
    symbol: String,
    bars: Vec<ReturnBar>,
}

fn require(date: NaiveDate, field: &str, value: Option<f64>) -> Result<f64> {
    value.ok_or_else(|| Error::MissingField(format!("bar {} has no {}", date, field)))
}

impl PreparedSeries {
    /// Prepare a raw bar series for analysis.
    ///
    /// The source is expected to deliver bars date-ascending; a bar dated
    /// earlier than its predecessor is a precondition violation and is
    /// rejected rather than re-sorted. Bars sharing a date are collapsed to
    /// the FIRST occurrence in source order. Flipping either rule would
    /// silently change every downstream statistic.
    ///
    /// # Errors
    ///
    /// - `EmptySeries` if fewer than 2 bars remain (no return computable)
    /// - `MissingField` if a surviving bar lacks `high`, `low`, `close`,
    ///   or `adj_close`
    /// - `OutOfOrderInput` if dates ever decrease
    pub fn from_bars(symbol: &str, raw: &[PriceBar]) -> Result<Self> {
        if raw.len() < 2 {
            return Err(Error::EmptySeries(format!(
                "need at least 2 bars to derive a return, got {}",
                raw.len()
            )));
        }

        // Ordering check and stable first-wins dedup. With ascending dates
        // enforced, duplicates can only be adjacent.
        let mut kept: Vec<&PriceBar> = Vec::with_capacity(raw.len());
        for bar in raw {
            if let Some(prev) = kept.last() {
                if bar.date < prev.date {
                    return Err(Error::OutOfOrderInput(format!(
                        "bar {} follows bar {}",
                        bar.date, prev.date
                    )));
                }
                if bar.date == prev.date {
                    // Provider sent the day twice; the first occurrence wins.
                    continue;
                }
            }
            kept.push(bar);
        }

        if kept.len() < 2 {
            return Err(Error::EmptySeries(format!(
                "only {} distinct date(s) after deduplication",
                kept.len()
            )));
        }

        struct Checked {
            date: NaiveDate,
            high: f64,
            low: f64,
            close: f64,
            adj_close: f64,
        }

        let mut checked = Vec::with_capacity(kept.len());
        for bar in &kept {
            checked.push(Checked {
                date: bar.date,
                high: require(bar.date, "high", bar.high)?,
                low: require(bar.date, "low", bar.low)?,
                close: require(bar.date, "close", bar.close)?,
                adj_close: require(bar.date, "adj_close", bar.adj_close)?,
            });
        }

        // Derive returns from index 1 onward; bar 0 only seeds the first
        // denominator and is dropped from the prepared series.
        let bars: Vec<ReturnBar> = checked
            .windows(2)
            .map(|w| ReturnBar {
                date: w[1].date,
                high: w[1].high,
                low: w[1].low,
                close: w[1].close,
                adj_close: w[1].adj_close,
                daily_return: w[1].adj_close / w[0].adj_close - 1.0,
            })
            .collect();

        tracing::debug!(
            "prepared {} of {} raw bars for {}",
            bars.len(),
            raw.len(),
            symbol
        );

        Ok(Self {
            symbol: symbol.to_string(),
            bars,
        })
    }

    /// The instrument symbol this series belongs to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The prepared bars, date-ascending.
    pub fn bars(&self) -> &[ReturnBar] {
        &self.bars
    }

    /// Number of prepared bars (= number of daily returns).
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The date of every prepared bar.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// The adjusted-close series.
    pub fn adj_closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.adj_close).collect()
    }

    /// The daily-return series.
    pub fn daily_returns(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.daily_return).collect()
    }
}
