//! Joining a return series with a factor table.

use crate::error::Result;
use chrono::NaiveDate;
use navigator_data::columns::{self, DATE, EXCESS, RETURN, RF};
use navigator_data::frame::{date_column, f64_column};
use navigator_data::{FactorTable, ReturnSeries};
use polars::prelude::*;
use tracing::debug;

/// Return series joined with factor data on date.
///
/// Columns: `date`, the asset's return column, `Mkt-RF`, `SMB`, `HML`, `RF`
/// and `Excess`. Rows are sorted by date and fully populated. The return
/// column is named after the ticker, or `Return` when the ticker collides
/// with another column (e.g. `RF`).
#[derive(Debug, Clone)]
pub struct MergedFrame {
    asset: String,
    return_column: String,
    frame: DataFrame,
}

impl MergedFrame {
    /// Ticker of the asset.
    pub fn asset(&self) -> &str {
        &self.asset
    }

    /// Name of the asset's return column.
    pub fn return_column(&self) -> &str {
        &self.return_column
    }

    /// Underlying frame.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Whether the join produced no rows.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Joined dates.
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        Ok(date_column(&self.frame, DATE)?)
    }

    /// Values of a column.
    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        Ok(f64_column(&self.frame, name)?)
    }

    /// Asset returns.
    pub fn returns(&self) -> Result<Vec<f64>> {
        self.column(&self.return_column)
    }

    /// Excess returns.
    pub fn excess(&self) -> Result<Vec<f64>> {
        self.column(EXCESS)
    }
}

/// Inner-join `returns` with `factors` on date and append `Excess`.
///
/// Factor periods are keyed by their last calendar day, so a monthly table
/// only matches returns dated on a month's final day. Dates missing on either
/// side are dropped; no overlap yields an empty frame rather than an error.
pub fn align(returns: &ReturnSeries, factors: &FactorTable) -> Result<MergedFrame> {
    let asset = returns.name();
    let collides = asset == DATE || asset == EXCESS || columns::FACTOR_TABLE.contains(&asset);
    let return_column = if collides { RETURN } else { asset };

    let factor_frame = factors.dated_frame()?;

    let frame = returns
        .frame()
        .clone()
        .lazy()
        .select([col(DATE), col(asset).alias(return_column)])
        .join(
            factor_frame.lazy(),
            [col(DATE)],
            [col(DATE)],
            JoinArgs::new(JoinType::Inner),
        )
        .sort([DATE], SortMultipleOptions::default())
        .with_column((col(return_column) - col(RF)).alias(EXCESS))
        .collect()?;

    debug!(
        asset,
        returns = returns.len(),
        factors = factors.len(),
        merged = frame.height(),
        "aligned returns with factors"
    );

    Ok(MergedFrame {
        asset: asset.to_string(),
        return_column: return_column.to_string(),
        frame,
    })
}
