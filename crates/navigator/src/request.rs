//! Request and response types of the analysis handler.

use navigator_data::ReturnSeries;
use navigator_model::{ActiveExposure, CumulativeReturns, MergedFrame, RegressionResult};
use navigator_output::Figure;
use serde::Serialize;

/// An asset ticker and an optional benchmark ticker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Asset ticker as entered.
    pub ticker: String,
    /// Benchmark ticker as entered.
    pub benchmark: Option<String>,
}

impl AnalysisRequest {
    /// Request for a single asset.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            benchmark: None,
        }
    }

    /// Add a benchmark.
    pub fn with_benchmark(mut self, benchmark: impl Into<String>) -> Self {
        self.benchmark = Some(benchmark.into());
        self
    }

    /// Trimmed, upper-cased asset ticker; `None` when blank.
    pub fn asset_ticker(&self) -> Option<String> {
        normalize(&self.ticker)
    }

    /// Trimmed, upper-cased benchmark ticker; `None` when absent or blank.
    pub fn benchmark_ticker(&self) -> Option<String> {
        self.benchmark.as_deref().and_then(normalize)
    }
}

fn normalize(ticker: &str) -> Option<String> {
    let ticker = ticker.trim();
    (!ticker.is_empty()).then(|| ticker.to_uppercase())
}

/// Regression of one ticker against the factors.
#[derive(Debug, Clone)]
pub struct AssetAnalysis {
    /// Upper-cased ticker.
    pub ticker: String,
    /// Display name.
    pub name: String,
    /// Daily returns as fetched.
    pub returns: ReturnSeries,
    /// Returns joined with factors.
    pub merged: MergedFrame,
    /// Regression outcome.
    pub result: RegressionResult,
}

/// Asset compared with its benchmark.
#[derive(Debug, Clone)]
pub struct BenchmarkComparison {
    /// The benchmark's own regression.
    pub benchmark: AssetAnalysis,
    /// Asset minus benchmark loadings.
    pub active: ActiveExposure,
    /// Compounded daily returns of both over common dates.
    pub cumulative: CumulativeReturns,
}

/// Everything computed for a request.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The requested asset.
    pub asset: AssetAnalysis,
    /// Comparison with the benchmark, when one was requested.
    pub benchmark: Option<BenchmarkComparison>,
}

/// Display-ready outputs. Every field is empty when there is nothing to show.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisResponse {
    /// Asset betas, or active betas when a benchmark succeeded.
    pub exposure_figure: Figure,
    /// Cumulative returns of asset and benchmark.
    pub cumulative_figure: Figure,
    /// Regression lines, or `Error: <message>` when the asset failed.
    pub summary_text: String,
    /// Generated interpretation.
    pub narrative: String,
    /// Relative performance sentence.
    pub cumulative_narrative: String,
    /// `Analysis Portfolio: ...` heading.
    pub portfolio_label: String,
    /// Asset regression.
    pub result: Option<RegressionResult>,
    /// Benchmark regression.
    pub benchmark_result: Option<RegressionResult>,
    /// Active exposures.
    pub active_exposure: Option<ActiveExposure>,
    /// Primary failure message.
    pub error: Option<String>,
    /// Non-fatal problems (benchmark or narrative failures).
    pub notes: Vec<String>,
    /// Full analysis for exports.
    #[serde(skip)]
    pub analysis: Option<Analysis>,
}

impl AnalysisResponse {
    /// Empty outputs with an `Error: <message>` summary.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            summary_text: format!("Error: {message}"),
            error: Some(message),
            ..Default::default()
        }
    }

    /// Whether the primary analysis failed.
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("arkk", Some("ARKK"))]
    #[case("  spy ", Some("SPY"))]
    #[case("", None)]
    #[case("   ", None)]
    fn test_ticker_normalization(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(AnalysisRequest::new(raw).asset_ticker().as_deref(), expected);
        assert_eq!(
            AnalysisRequest::new("QQQ")
                .with_benchmark(raw)
                .benchmark_ticker()
                .as_deref(),
            expected
        );
    }

    #[test]
    fn test_failed_response() {
        let response = AnalysisResponse::failed("no data for ZZZZ");

        assert!(response.is_error());
        assert_eq!(response.summary_text, "Error: no data for ZZZZ");
        assert!(response.exposure_figure.is_empty());
        assert!(response.narrative.is_empty());
        assert!(response.portfolio_label.is_empty());
    }
}
