//! The analysis pipeline and its request handler.

use crate::config::NavigatorConfig;
use crate::error::{NavigatorError, Result};
use crate::request::{
    Analysis, AnalysisRequest, AnalysisResponse, AssetAnalysis, BenchmarkComparison,
};
use crate::sources::{FactorLoader, FactorSource, ReturnSource};
use navigator_data::{FactorTable, FrenchLibraryClient, ReturnSeries, YahooQuoteProvider};
use navigator_model::{
    ActiveExposure, MergedFrame, RegressionResult, align, compound_monthly, cumulative_returns,
    run_factor_regression,
};
use navigator_narrative::{
    OpenAiClient, TextGenerator, summarize_active_exposures, summarize_factor_regression,
};
use navigator_output::{
    active_exposure_figure, cumulative_figure, exposure_figure, portfolio_label,
    regression_summary_text, summarize_cumulative_returns,
};
use tracing::{error, info, warn};

/// Navigator wired to Yahoo Finance, the French library and OpenAI.
pub type DefaultNavigator = Navigator<YahooQuoteProvider, FactorLoader, OpenAiClient>;

/// Runs factor analyses against a return source, a factor source and an
/// optional text generator.
pub struct Navigator<R, F, G> {
    returns: R,
    factors: F,
    generator: Option<G>,
    config: NavigatorConfig,
}

impl<R, F, G> std::fmt::Debug for Navigator<R, F, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("config", &self.config)
            .field("narrative", &self.generator.is_some())
            .finish_non_exhaustive()
    }
}

impl DefaultNavigator {
    /// Build the production pipeline from `config`.
    ///
    /// Narratives are enabled only when `config.narrative` is set and an
    /// [`LlmConfig`](navigator_narrative::LlmConfig) is present.
    pub fn from_config(config: NavigatorConfig) -> Result<Self> {
        let factors = match &config.factors_file {
            Some(path) => FactorLoader::File(path.clone()),
            None => FactorLoader::Remote(FrenchLibraryClient::new()?),
        };

        let generator = match (&config.llm, config.narrative) {
            (Some(llm), true) => Some(OpenAiClient::new(llm.clone())?),
            _ => None,
        };

        Ok(Self::new(YahooQuoteProvider::new()?, factors, generator, config))
    }
}

impl<R, F, G> Navigator<R, F, G>
where
    R: ReturnSource + Sync,
    F: FactorSource + Sync,
    G: TextGenerator + Sync,
{
    /// Assemble a pipeline from its parts.
    pub const fn new(returns: R, factors: F, generator: Option<G>, config: NavigatorConfig) -> Self {
        Self {
            returns,
            factors,
            generator,
            config,
        }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// The return source.
    pub const fn returns(&self) -> &R {
        &self.returns
    }

    /// Load the configured factor table.
    pub async fn load_factors(&self) -> Result<FactorTable> {
        let table = self
            .factors
            .factors(self.config.dataset, self.config.start)
            .await?;
        info!(dataset = %self.config.dataset, rows = table.len(), "factors ready");
        Ok(table)
    }

    /// Regress `returns` on `factors`.
    ///
    /// Daily returns are compounded to months first when the table is monthly
    /// and compounding is enabled.
    pub fn fit(
        &self,
        ticker: &str,
        returns: &ReturnSeries,
        factors: &FactorTable,
    ) -> Result<(MergedFrame, RegressionResult)> {
        let merged = if self.config.compound_monthly && factors.is_period_indexed() {
            align(&compound_monthly(returns)?, factors)?
        } else {
            align(returns, factors)?
        };
        info!(ticker, rows = merged.len(), "returns aligned with factors");

        let result = run_factor_regression(&merged)?;
        info!(ticker, %result, "regression complete");
        Ok((merged, result))
    }

    async fn fetch_returns(&self, ticker: &str) -> Result<ReturnSeries> {
        let returns = self.returns.returns(ticker, self.config.start).await?;
        info!(ticker, rows = returns.len(), "returns fetched");
        Ok(returns)
    }

    async fn assemble(
        &self,
        ticker: &str,
        returns: ReturnSeries,
        factors: &FactorTable,
    ) -> Result<AssetAnalysis> {
        let (merged, result) = self.fit(ticker, &returns, factors)?;
        let name = self.returns.display_name(ticker).await;

        Ok(AssetAnalysis {
            ticker: ticker.to_string(),
            name,
            returns,
            merged,
            result,
        })
    }

    /// Asset returns, then factors, then the asset's regression.
    async fn analyze_asset(&self, ticker: &str) -> Result<(AssetAnalysis, FactorTable)> {
        let returns = self.fetch_returns(ticker).await?;
        let factors = self.load_factors().await?;
        let asset = self.assemble(ticker, returns, &factors).await?;
        Ok((asset, factors))
    }

    async fn compare(
        &self,
        asset: &AssetAnalysis,
        benchmark_ticker: &str,
        factors: &FactorTable,
    ) -> Result<BenchmarkComparison> {
        let returns = self.fetch_returns(benchmark_ticker).await?;
        let benchmark = self.assemble(benchmark_ticker, returns, factors).await?;
        let active = ActiveExposure::between(&asset.result, &benchmark.result);
        let cumulative = cumulative_returns(&asset.returns, &benchmark.returns)?;

        Ok(BenchmarkComparison {
            benchmark,
            active,
            cumulative,
        })
    }

    /// Run the analysis, failing on the first error of any stage.
    ///
    /// Fetches asset returns, then factors, then the benchmark. Narratives are
    /// not generated; see [`Self::narrate`].
    pub async fn run(&self, request: &AnalysisRequest) -> Result<Analysis> {
        let ticker = request.asset_ticker().ok_or(NavigatorError::EmptyTicker)?;
        let (asset, factors) = self.analyze_asset(&ticker).await?;

        let benchmark = match request.benchmark_ticker() {
            Some(bm) => Some(self.compare(&asset, &bm, &factors).await?),
            None => None,
        };

        Ok(Analysis { asset, benchmark })
    }

    /// Plain-language summary of an analysis, or `None` without a generator.
    ///
    /// With a benchmark this describes the active exposures; otherwise it
    /// interprets the asset's own regression.
    pub async fn narrate(&self, analysis: &Analysis) -> Result<Option<String>> {
        let Some(generator) = &self.generator else {
            return Ok(None);
        };

        let asset = &analysis.asset;
        let text = match &analysis.benchmark {
            Some(cmp) => {
                summarize_active_exposures(
                    generator,
                    &asset.result,
                    &cmp.benchmark.result,
                    &asset.ticker,
                    &cmp.benchmark.ticker,
                )
                .await?
            }
            None => summarize_factor_regression(generator, &asset.result, &asset.ticker).await?,
        };
        Ok(Some(text))
    }

    /// Serve a request, degrading instead of failing.
    ///
    /// * blank ticker: every output empty, nothing fetched
    /// * asset, factor, alignment or regression failure: empty figures and
    ///   `summary_text = "Error: <message>"`
    /// * benchmark failure: asset outputs kept, comparison outputs empty, the
    ///   error recorded in `notes`
    /// * narrative failure: numbers kept, narrative empty, error in `notes`
    pub async fn handle(&self, request: &AnalysisRequest) -> AnalysisResponse {
        let Some(ticker) = request.asset_ticker() else {
            return AnalysisResponse::default();
        };

        let (asset, factors) = match self.analyze_asset(&ticker).await {
            Ok(leg) => leg,
            Err(e) => {
                error!(ticker, error = %e, "analysis failed");
                return AnalysisResponse::failed(e.to_string());
            }
        };

        let mut response = AnalysisResponse {
            exposure_figure: exposure_figure(&asset.ticker, &asset.result),
            summary_text: regression_summary_text(&asset.result),
            result: Some(asset.result),
            ..Default::default()
        };

        let mut benchmark = None;
        let mut narrate = true;
        if let Some(bm) = request.benchmark_ticker() {
            match self.compare(&asset, &bm, &factors).await {
                Ok(cmp) => {
                    response.exposure_figure = active_exposure_figure(&cmp.active);
                    response.cumulative_figure = cumulative_figure(&cmp.cumulative);
                    response.cumulative_narrative = summarize_cumulative_returns(&cmp.cumulative);
                    response.benchmark_result = Some(cmp.benchmark.result);
                    response.active_exposure = Some(cmp.active);
                    benchmark = Some(cmp);
                }
                Err(e) => {
                    warn!(benchmark = %bm, error = %e, "benchmark analysis failed");
                    response.notes.push(format!("Benchmark {bm}: {e}"));
                    narrate = false;
                }
            }
        }

        response.portfolio_label = portfolio_label(
            &asset.name,
            benchmark.as_ref().map(|cmp| cmp.benchmark.name.as_str()),
        );

        let analysis = Analysis { asset, benchmark };
        if narrate {
            match self.narrate(&analysis).await {
                Ok(text) => response.narrative = text.unwrap_or_default(),
                Err(e) => {
                    warn!(error = %e, "narrative generation failed");
                    response.notes.push(format!("Narrative: {e}"));
                }
            }
        }

        response.analysis = Some(analysis);
        response
    }
}
