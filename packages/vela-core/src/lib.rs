//! Vela Core - Price-series risk and performance analytics library.
//!
//! This crate turns a daily OHLC price series for a single instrument into
//! a fixed battery of risk and performance statistics:
//!
//! - **Growth**: compounded annual growth rate and buy-and-hold return
//! - **Drawdown**: maximum decline from the running historical peak
//! - **Distribution**: moments of the daily-return distribution, plus
//!   Gaussian and empirical Value-at-Risk at 95/99/99.7% confidence
//! - **Volatility**: annualized volatility and a 14-day rolling profile
//!   with its 126-point moving average and extremum dates
//!
//! Retrieving the raw series from a market-data provider and rendering the
//! results are left to external collaborators: the crate consumes an
//! already-fetched bar sequence (see [`DailyBarSource`]) and returns an
//! immutable [`AnalysisReport`] per request.
//!
//! # Example
//!
//! ```rust,no_run
//! use vela_core::{analyze, PriceBar};
//!
//! // Bars as handed over by the data-source collaborator, date-ascending.
//! let bars: Vec<PriceBar> = fetch_from_somewhere();
//!
//! let report = analyze("SPY", &bars).expect("series too short");
//! println!("CAGR: {:.2}%", report.metrics.cagr_pct);
//! println!("Max drawdown: {:.2}%", report.metrics.max_drawdown_pct);
//! # fn fetch_from_somewhere() -> Vec<vela_core::PriceBar> { Vec::new() }
//! ```

pub mod analysis;
pub mod series;
pub mod source;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use analysis::{analyze, analyze_prepared, AnalysisReport, SeriesMetrics, VolatilityProfile};
pub use series::{PreparedSeries, ReturnBar};
pub use source::{analyze_symbol, DailyBarSource};
pub use types::{AnalysisRequest, ApiResponse, PriceBar, VolatilityExtreme};

/// Error types for vela-core operations.
///
/// Every analysis error marks a precondition violation on the input series;
/// there is no local recovery, and no partially populated report is ever
/// returned. Degenerate but legitimate statistics (for example NaN moments
/// of a zero-variance return distribution) are not errors and come back
/// through the report unmodified.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty series: {0}")]
    EmptySeries(String),

    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Division undefined: {0}")]
    DivisionUndefined(String),

    #[error("Out-of-order input: {0}")]
    OutOfOrderInput(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for vela-core operations.
pub type Result<T> = std::result::Result<T, Error>;
