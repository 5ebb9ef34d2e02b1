//! Core data types for the analytics pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One calendar day's observation for a single instrument, as received from
/// a market-data provider.
///
/// Numeric fields are optional because a provider row can arrive with holes.
/// Series preparation rejects any bar that lacks a field the analytics need
/// (`high`, `low`, `close`, `adj_close`); `open` is carried through but no
/// statistic reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Observation date (unique key within a series)
    pub date: NaiveDate,
    /// Opening price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    /// Intraday high
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    /// Intraday low
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    /// Closing price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
    /// Dividend- and split-adjusted closing price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adj_close: Option<f64>,
}

impl PriceBar {
    /// Create a fully populated bar.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, adj_close: f64) -> Self {
        Self {
            date,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            adj_close: Some(adj_close),
        }
    }
}

/// The three values that fully determine an analysis request.
///
/// Window lengths, confidence levels, and the 252-day annualization
/// convention are fixed design constants, not request parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Instrument symbol (uppercase)
    pub symbol: String,
    /// First calendar date of the requested range
    pub from: NaiveDate,
    /// Last calendar date of the requested range
    pub to: NaiveDate,
}

impl AnalysisRequest {
    /// Create a validated request. The symbol must be non-empty and the
    /// range must satisfy `from <= to`.
    pub fn new(symbol: &str, from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if symbol.trim().is_empty() {
            return Err(Error::InvalidRequest("symbol must be non-empty".to_string()));
        }
        if from > to {
            return Err(Error::InvalidRequest(format!(
                "from date {} is after to date {}",
                from, to
            )));
        }
        Ok(Self {
            symbol: symbol.trim().to_uppercase(),
            from,
            to,
        })
    }
}

/// A dated extremum of the annualized rolling-volatility series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityExtreme {
    /// First date (chronological) at which the extremum is attained
    pub date: NaiveDate,
    /// Annualized volatility on that date, in percent
    pub value: f64,
}

/// API response wrapper for success cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_price_bar_new() {
        let bar = PriceBar::new(date("2024-01-02"), 10.0, 11.0, 9.5, 10.5, 10.4);
        assert_eq!(bar.high, Some(11.0));
        assert_eq!(bar.adj_close, Some(10.4));
    }

    #[test]
    fn test_price_bar_deserializes_with_holes() {
        // A provider row without open or adj_close still parses; the
        // preparer decides later whether the holes matter.
        let json = r#"{"date":"2024-01-02","high":11.0,"low":9.5,"close":10.5}"#;
        let bar: PriceBar = serde_json::from_str(json).unwrap();
        assert_eq!(bar.date, date("2024-01-02"));
        assert!(bar.open.is_none());
        assert!(bar.adj_close.is_none());
        assert_eq!(bar.close, Some(10.5));
    }

    #[test]
    fn test_request_uppercases_symbol() {
        let req = AnalysisRequest::new("spy", date("2024-01-01"), date("2024-06-30")).unwrap();
        assert_eq!(req.symbol, "SPY");
    }

    #[test]
    fn test_request_rejects_empty_symbol() {
        let result = AnalysisRequest::new("  ", date("2024-01-01"), date("2024-06-30"));
        assert!(matches!(result, Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_request_rejects_inverted_range() {
        let result = AnalysisRequest::new("SPY", date("2024-06-30"), date("2024-01-01"));
        assert!(matches!(result, Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_api_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test".to_string());
        assert!(response.ok);
        assert_eq!(response.data, Some("test".to_string()));

        let err_response: ApiResponse<String> = ApiResponse::err("error");
        assert!(!err_response.ok);
        assert_eq!(err_response.error, Some("error".to_string()));
    }
}
