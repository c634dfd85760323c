//! Prompt construction and the two regression summarizers.

use crate::client::TextGenerator;
use crate::error::Result;
use navigator_model::{ActiveExposure, RegressionResult};
use tracing::{debug, info};

/// Prompt asking for an interpretation of a single regression.
pub fn factor_regression_prompt(result: &RegressionResult, ticker: &str) -> String {
    format!(
        "You are a financial analyst. Interpret the following factor regression results for ETF {ticker}.\n\
         Keep it concise and use plain language suitable for a portfolio manager.\n\
         \n\
         Results:\n\
         \x20   - Intercept (alpha): {:.4}\n\
         \x20   - Beta Mkt-RF: {:.4}\n\
         \x20   - Beta SMB: {:.4}\n\
         \x20   - Beta HML: {:.4}\n\
         \x20   - R-squared: {:.4}\n\
         \n\
         Return a short paragraph explaining what these numbers suggest about the ETF's behavior and factor exposures.",
        result.alpha, result.beta_mkt_rf, result.beta_smb, result.beta_hml, result.r_squared,
    )
}

/// Prompt comparing an asset's loadings with its benchmark's.
pub fn active_exposure_prompt(
    etf: &RegressionResult,
    benchmark: &RegressionResult,
    etf_ticker: &str,
    benchmark_ticker: &str,
) -> String {
    let active = ActiveExposure::between(etf, benchmark);

    format!(
        "You are a financial analyst. Compare the factor exposures of ETF {etf_ticker} against its benchmark {benchmark_ticker}.\n\
         \n\
         Factor exposures (Beta):\n\
         {etf_ticker}:\n\
         {}\n\
         \n\
         {benchmark_ticker}:\n\
         {}\n\
         \n\
         Active Exposures (ETF - Benchmark):\n\
         \x20   - Beta Mkt-RF: {:.4}\n\
         \x20   - Beta SMB: {:.4}\n\
         \x20   - Beta HML: {:.4}\n\
         \x20   - Alpha Diff: {:.4}\n\
         \n\
         Write a short paragraph that summarizes these differences and what they imply about how {etf_ticker} is positioned relative to {benchmark_ticker}. Use plain language.",
        exposure_lines(etf),
        exposure_lines(benchmark),
        active.beta_mkt_rf,
        active.beta_smb,
        active.beta_hml,
        active.alpha_diff,
    )
}

fn exposure_lines(result: &RegressionResult) -> String {
    format!(
        "    - Beta Mkt-RF: {:.4}\n    - Beta SMB: {:.4}\n    - Beta HML: {:.4}\n    - Alpha: {:.4}",
        result.beta_mkt_rf, result.beta_smb, result.beta_hml, result.alpha,
    )
}

/// Ask `generator` to interpret a regression in plain language.
pub async fn summarize_factor_regression<G>(
    generator: &G,
    result: &RegressionResult,
    ticker: &str,
) -> Result<String>
where
    G: TextGenerator + ?Sized,
{
    info!(ticker, "requesting regression summary");
    let summary = generator
        .complete(&factor_regression_prompt(result, ticker))
        .await?;
    debug!(ticker, chars = summary.len(), "regression summary received");
    Ok(summary)
}

/// Ask `generator` to describe how an asset is positioned against its benchmark.
pub async fn summarize_active_exposures<G>(
    generator: &G,
    etf: &RegressionResult,
    benchmark: &RegressionResult,
    etf_ticker: &str,
    benchmark_ticker: &str,
) -> Result<String>
where
    G: TextGenerator + ?Sized,
{
    info!(etf_ticker, benchmark_ticker, "requesting active exposure summary");
    let summary = generator
        .complete(&active_exposure_prompt(
            etf,
            benchmark,
            etf_ticker,
            benchmark_ticker,
        ))
        .await?;
    debug!(etf_ticker, chars = summary.len(), "active exposure summary received");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NarrativeError;
    use std::sync::Mutex;

    /// Records prompts and replies with a fixed answer.
    #[derive(Debug, Default)]
    struct Recorder {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl TextGenerator for Recorder {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                Err(NarrativeError::EmptyResponse)
            } else {
                Ok("Tilted toward small growth names.".to_string())
            }
        }
    }

    fn arkk() -> RegressionResult {
        RegressionResult {
            alpha: 0.00031,
            beta_mkt_rf: 1.3512,
            beta_smb: 0.61234,
            beta_hml: -0.4821,
            r_squared: 0.71,
            observations: 250,
        }
    }

    fn spy() -> RegressionResult {
        RegressionResult {
            alpha: 0.00001,
            beta_mkt_rf: 0.9987,
            beta_smb: -0.1502,
            beta_hml: 0.0213,
            r_squared: 0.99,
            observations: 250,
        }
    }

    #[test]
    fn test_regression_prompt_lists_results() {
        let prompt = factor_regression_prompt(&arkk(), "ARKK");

        assert!(prompt.starts_with("You are a financial analyst."));
        assert!(prompt.contains("results for ETF ARKK."));
        assert!(prompt.contains("    - Intercept (alpha): 0.0003\n"));
        assert!(prompt.contains("    - Beta Mkt-RF: 1.3512\n"));
        assert!(prompt.contains("    - Beta SMB: 0.6123\n"));
        assert!(prompt.contains("    - Beta HML: -0.4821\n"));
        assert!(prompt.contains("    - R-squared: 0.7100\n"));
    }

    #[test]
    fn test_active_prompt_lists_differences() {
        let prompt = active_exposure_prompt(&arkk(), &spy(), "ARKK", "SPY");

        assert!(prompt.contains("ETF ARKK against its benchmark SPY."));
        assert!(prompt.contains("ARKK:\n    - Beta Mkt-RF: 1.3512"));
        assert!(prompt.contains("SPY:\n    - Beta Mkt-RF: 0.9987"));
        assert!(prompt.contains("Active Exposures (ETF - Benchmark):\n    - Beta Mkt-RF: 0.3525"));
        assert!(prompt.contains("    - Alpha Diff: 0.0003"));
        assert!(prompt.ends_with("relative to SPY. Use plain language."));
    }

    #[tokio::test]
    async fn test_summaries_send_one_prompt_each() {
        let recorder = Recorder::default();

        let single = summarize_factor_regression(&recorder, &arkk(), "ARKK")
            .await
            .unwrap();
        let active = summarize_active_exposures(&recorder, &arkk(), &spy(), "ARKK", "SPY")
            .await
            .unwrap();

        assert_eq!(single, "Tilted toward small growth names.");
        assert_eq!(active, single);

        let prompts = recorder.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("Alpha Diff"));
    }

    #[tokio::test]
    async fn test_generator_failure_propagates() {
        let recorder = Recorder {
            fail: true,
            ..Default::default()
        };

        let result = summarize_factor_regression(&recorder, &spy(), "SPY").await;
        assert!(matches!(result, Err(NarrativeError::EmptyResponse)));
    }
}
