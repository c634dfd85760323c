//! JSON report of one analysis run.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Required field not set on the builder.
    #[error("Missing report field: {0}")]
    MissingField(&'static str),
}

/// A report of a factor analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Ticker being analyzed.
    pub symbol: String,

    /// Benchmark ticker, if any.
    pub benchmark: Option<String>,

    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// First date of requested history.
    pub start: NaiveDate,

    /// Factor dataset used.
    pub dataset: String,

    /// Report contents (JSON format).
    pub contents: serde_json::Value,
}

impl Report {
    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    symbol: Option<String>,
    benchmark: Option<String>,
    start: Option<NaiveDate>,
    dataset: Option<String>,
    contents: Option<serde_json::Value>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the symbol.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Set the benchmark.
    pub fn benchmark(mut self, benchmark: Option<String>) -> Self {
        self.benchmark = benchmark;
        self
    }

    /// Set the start of history.
    pub const fn start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the dataset name.
    pub fn dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    /// Set the report contents.
    pub fn contents(mut self, contents: serde_json::Value) -> Self {
        self.contents = Some(contents);
        self
    }

    /// Build the report.
    pub fn build(self) -> Result<Report, ReportError> {
        Ok(Report {
            symbol: self.symbol.ok_or(ReportError::MissingField("symbol"))?,
            benchmark: self.benchmark,
            timestamp: Utc::now(),
            start: self.start.ok_or(ReportError::MissingField("start"))?,
            dataset: self.dataset.unwrap_or_default(),
            contents: self.contents.unwrap_or(serde_json::Value::Null),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
    }

    #[test]
    fn test_report_builder() {
        let report = ReportBuilder::new()
            .symbol("ARKK")
            .benchmark(Some("SPY".to_string()))
            .start(start())
            .dataset("F-F_Research_Data_Factors")
            .contents(serde_json::json!({"key": "value"}))
            .build()
            .unwrap();

        assert_eq!(report.symbol, "ARKK");
        assert_eq!(report.benchmark.as_deref(), Some("SPY"));
        assert_eq!(report.contents["key"], "value");
    }

    #[test]
    fn test_missing_symbol() {
        let result = ReportBuilder::new().start(start()).build();
        assert!(matches!(result, Err(ReportError::MissingField("symbol"))));
    }

    #[test]
    fn test_report_json() {
        let report = ReportBuilder::new().symbol("SPY").start(start()).build().unwrap();
        let json = report.to_json().unwrap();

        assert!(json.contains("\"symbol\": \"SPY\""));
        assert!(json.contains("\"start\": \"2000-01-01\""));
        assert!(json.contains("\"benchmark\": null"));
    }
}
