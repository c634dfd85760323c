//! Report and file exports of a handled request.

use crate::config::NavigatorConfig;
use crate::error::Result;
use crate::request::AnalysisResponse;
use navigator_output::{
    CoefficientRecord, ExportFormat, Exporter, Report, ReportBuilder, export_merged_frame,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// JSON report of a response.
pub fn build_report(response: &AnalysisResponse, config: &NavigatorConfig) -> Result<Report> {
    let (symbol, benchmark) = match &response.analysis {
        Some(analysis) => (
            analysis.asset.ticker.clone(),
            analysis.benchmark.as_ref().map(|b| b.benchmark.ticker.clone()),
        ),
        None => (String::new(), None),
    };

    Ok(ReportBuilder::new()
        .symbol(symbol)
        .benchmark(benchmark)
        .start(config.start)
        .dataset(config.dataset.name())
        .contents(serde_json::to_value(response).map_err(navigator_output::ReportError::from)?)
        .build()?)
}

/// Write merged frames and coefficients as CSV into `dir`.
///
/// Returns the paths written. Nothing is written for a failed response.
pub fn write_exports(response: &AnalysisResponse, dir: &Path) -> Result<Vec<PathBuf>> {
    let Some(analysis) = &response.analysis else {
        return Ok(Vec::new());
    };
    std::fs::create_dir_all(dir).map_err(navigator_output::ExportError::from)?;

    let format = ExportFormat::Csv;
    let asset = &analysis.asset;
    let mut written = Vec::new();

    let path = dir.join(format!("{}_merged.{}", asset.ticker, format.extension()));
    export_merged_frame(&asset.merged)?.export_to_file(&path, format)?;
    written.push(path);

    let mut coefficients = CoefficientRecord::from_result(&asset.ticker, &asset.result);
    if let Some(cmp) = &analysis.benchmark {
        let bm = &cmp.benchmark;
        let path = dir.join(format!("{}_merged.{}", bm.ticker, format.extension()));
        export_merged_frame(&bm.merged)?.export_to_file(&path, format)?;
        written.push(path);

        coefficients.extend(CoefficientRecord::from_result(&bm.ticker, &bm.result));
        coefficients.extend(CoefficientRecord::from_active(
            &format!("{}-{}", asset.ticker, bm.ticker),
            &cmp.active,
        ));
    }

    let path = dir.join(format!("{}_coefficients.{}", asset.ticker, format.extension()));
    coefficients.export_to_file(&path, format)?;
    written.push(path);

    info!(files = written.len(), dir = %dir.display(), "exports written");
    Ok(written)
}
