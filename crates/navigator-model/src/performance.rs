//! Cumulative return comparison between an asset and a benchmark.

use crate::error::{ModelError, Result};
use chrono::NaiveDate;
use navigator_data::ReturnSeries;
use navigator_data::columns::DATE;
use navigator_data::frame::{date_column, f64_column};
use polars::prelude::*;

const ASSET: &str = "asset";
const BENCHMARK: &str = "benchmark";

/// Compounded returns of two series over their common dates.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeReturns {
    /// Asset ticker.
    pub asset_name: String,
    /// Benchmark ticker.
    pub benchmark_name: String,
    /// Dates present in both series.
    pub dates: Vec<NaiveDate>,
    /// Running `prod(1 + r) - 1` of the asset.
    pub asset: Vec<f64>,
    /// Running `prod(1 + r) - 1` of the benchmark.
    pub benchmark: Vec<f64>,
}

impl CumulativeReturns {
    /// Asset cumulative return at the last common date.
    pub fn final_asset(&self) -> Option<f64> {
        self.asset.last().copied()
    }

    /// Benchmark cumulative return at the last common date.
    pub fn final_benchmark(&self) -> Option<f64> {
        self.benchmark.last().copied()
    }

    /// Final asset cumulative return minus the benchmark's.
    pub fn outperformance(&self) -> Option<f64> {
        Some(self.final_asset()? - self.final_benchmark()?)
    }
}

/// Join two return series on date and compound each from the first common day.
///
/// Fails with [`ModelError::InsufficientData`] when the series share no dates.
pub fn cumulative_returns(
    asset: &ReturnSeries,
    benchmark: &ReturnSeries,
) -> Result<CumulativeReturns> {
    let left = asset
        .frame()
        .clone()
        .lazy()
        .select([col(DATE), col(asset.name()).alias(ASSET)]);
    let right = benchmark
        .frame()
        .clone()
        .lazy()
        .select([col(DATE), col(benchmark.name()).alias(BENCHMARK)]);

    let combined = left
        .join(right, [col(DATE)], [col(DATE)], JoinArgs::new(JoinType::Inner))
        .sort([DATE], SortMultipleOptions::default())
        .with_columns([
            ((lit(1.0) + col(ASSET)).cum_prod(false) - lit(1.0)).alias(ASSET),
            ((lit(1.0) + col(BENCHMARK)).cum_prod(false) - lit(1.0)).alias(BENCHMARK),
        ])
        .collect()?;

    if combined.height() == 0 {
        return Err(ModelError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    Ok(CumulativeReturns {
        asset_name: asset.name().to_string(),
        benchmark_name: benchmark.name().to_string(),
        dates: date_column(&combined, DATE)?,
        asset: f64_column(&combined, ASSET)?,
        benchmark: f64_column(&combined, BENCHMARK)?,
    })
}
