//! CSV and JSON export of merged data and regression coefficients.

use chrono::NaiveDate;
use navigator_data::columns::{EXCESS, HML, MKT_RF, RF, SMB};
use navigator_model::{ActiveExposure, Coefficient, MergedFrame, ModelError, RegressionResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading the merged frame failed.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// One named coefficient of one ticker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoefficientRecord {
    /// Ticker, or `ETF-BENCHMARK` for active exposures.
    pub symbol: String,

    /// Coefficient label.
    pub coefficient: String,

    /// Value.
    pub value: f64,
}

impl CoefficientRecord {
    /// Alpha, the three betas, R² and the observation count of a regression.
    pub fn from_result(symbol: &str, result: &RegressionResult) -> Vec<Self> {
        let mut records: Vec<Self> = Coefficient::ALL
            .iter()
            .map(|c| Self::new(symbol, c.label(), result.get(*c)))
            .collect();
        records.push(Self::new(symbol, "R-squared", result.r_squared));
        records.push(Self::new(symbol, "Observations", result.observations as f64));
        records
    }

    /// Active betas and the alpha difference.
    pub fn from_active(symbol: &str, active: &ActiveExposure) -> Vec<Self> {
        Coefficient::ALL
            .iter()
            .map(|c| match c {
                Coefficient::Alpha => Self::new(symbol, "Alpha Diff", active.alpha_diff),
                _ => Self::new(symbol, c.label(), active.get(*c)),
            })
            .collect()
    }

    fn new(symbol: &str, coefficient: &str, value: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            coefficient: coefficient.to_string(),
            value,
        }
    }
}

/// One row of a merged frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MergedRow {
    /// Observation date.
    pub date: NaiveDate,

    /// Asset return.
    #[serde(rename = "Return")]
    pub asset_return: f64,

    /// Market excess return.
    #[serde(rename = "Mkt-RF")]
    pub mkt_rf: f64,

    /// Small minus big.
    #[serde(rename = "SMB")]
    pub smb: f64,

    /// High minus low.
    #[serde(rename = "HML")]
    pub hml: f64,

    /// Risk-free rate.
    #[serde(rename = "RF")]
    pub rf: f64,

    /// Asset return minus the risk-free rate.
    #[serde(rename = "Excess")]
    pub excess: f64,
}

/// Rows of a merged frame, in date order.
pub fn export_merged_frame(merged: &MergedFrame) -> Result<Vec<MergedRow>, ExportError> {
    let dates = merged.dates()?;
    let returns = merged.returns()?;
    let mkt_rf = merged.column(MKT_RF)?;
    let smb = merged.column(SMB)?;
    let hml = merged.column(HML)?;
    let rf = merged.column(RF)?;
    let excess = merged.column(EXCESS)?;

    Ok((0..dates.len())
        .map(|i| MergedRow {
            date: dates[i],
            asset_return: returns[i],
            mkt_rf: mkt_rf[i],
            smb: smb[i],
            hml: hml[i],
            rf: rf[i],
            excess: excess[i],
        })
        .collect())
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn records_to_string<T: Serialize>(
    records: &[T],
    format: ExportFormat,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            for record in records {
                wtr.serialize(record)?;
            }
            let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
            String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
        }
        ExportFormat::Json => Ok(serde_json::to_string(records)?),
        ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(records)?),
    }
}

impl Exporter for Vec<CoefficientRecord> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        records_to_string(self, format)
    }
}

impl Exporter for Vec<MergedRow> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        records_to_string(self, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> RegressionResult {
        RegressionResult {
            alpha: 0.0002,
            beta_mkt_rf: 1.1,
            beta_smb: 0.3,
            beta_hml: -0.2,
            r_squared: 0.9,
            observations: 250,
        }
    }

    #[test]
    fn test_coefficient_records() {
        let records = CoefficientRecord::from_result("ARKK", &result());

        assert_eq!(records.len(), 6);
        assert_eq!(records[0].coefficient, "Intercept (alpha)");
        assert_eq!(records[1].value, 1.1);
        assert_eq!(records[4].coefficient, "R-squared");
        assert_eq!(records[5].value, 250.0);
    }

    #[test]
    fn test_active_records() {
        let bm = RegressionResult {
            alpha: 0.0001,
            ..result()
        };
        let records =
            CoefficientRecord::from_active("ARKK-SPY", &ActiveExposure::between(&result(), &bm));

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].coefficient, "Alpha Diff");
        assert_eq!(records[0].value, 0.0002 - 0.0001);
        assert_eq!(records[3].coefficient, "Beta HML");
        assert_eq!(records[3].value, 0.0);
    }

    #[test]
    fn test_coefficient_csv() {
        let csv = CoefficientRecord::from_result("SPY", &result())
            .export_to_string(ExportFormat::Csv)
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "symbol,coefficient,value");
        assert_eq!(lines[1], "SPY,Intercept (alpha),0.0002");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_coefficient_json() {
        let json = CoefficientRecord::from_result("SPY", &result())
            .export_to_string(ExportFormat::Json)
            .unwrap();
        let parsed: Vec<CoefficientRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[2].coefficient, "Beta SMB");
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }
}
