//! HTTP client for the Kenneth R. French data library.

use super::FactorDataset;
use super::parse::{extract_csv, parse_factor_csv};
use crate::error::{DataError, Result};
use crate::types::FactorTable;
use chrono::NaiveDate;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Base URL of the library's zipped CSV files.
pub const FRENCH_LIBRARY_URL: &str =
    "https://mba.tuck.dartmouth.edu/pages/faculty/ken.french/ftp";

/// The library publishes percentages; values are divided by this.
pub const PERCENT_SCALE: f64 = 100.0;

const USER_AGENT: &str = "Navigator-FactorAnalyzer/0.1";

/// Client for downloading Fama/French factor datasets.
pub struct FrenchLibraryClient {
    client: reqwest::Client,
    base_url: String,
}

impl FrenchLibraryClient {
    /// Create a client pointing at the public library.
    pub fn new() -> Result<Self> {
        Self::with_base_url(FRENCH_LIBRARY_URL)
    }

    /// Create a client pointing at a mirror of the library.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// URL of a dataset's zipped CSV.
    pub fn dataset_url(&self, dataset: FactorDataset) -> String {
        format!("{}/{}_CSV.zip", self.base_url, dataset.name())
    }

    /// Download a dataset and return its primary table as fractions, keeping
    /// periods that end on or after `start`.
    pub async fn fetch_factors(
        &self,
        dataset: FactorDataset,
        start: NaiveDate,
    ) -> Result<FactorTable> {
        let url = self.dataset_url(dataset);
        debug!(%url, "downloading factor dataset");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(DataError::Network)?;

        if !response.status().is_success() {
            return Err(DataError::unavailable(
                dataset.name(),
                format!("HTTP {}", response.status()),
            ));
        }

        let bytes = response.bytes().await.map_err(DataError::Network)?;
        let table = prepare_table(&extract_csv(&bytes)?, start)?;
        info!(dataset = %dataset, rows = table.len(), "loaded factor dataset");

        Ok(table)
    }

    /// Load a dataset from a local `.zip` or `.csv` file.
    pub async fn load_file(path: impl AsRef<Path>, start: NaiveDate) -> Result<FactorTable> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;

        let text = if bytes.starts_with(b"PK") {
            extract_csv(&bytes)?
        } else {
            String::from_utf8(bytes)
                .map_err(|e| DataError::Parse(format!("{}: {}", path.display(), e)))?
        };

        let table = prepare_table(&text, start)?;
        info!(path = %path.display(), rows = table.len(), "loaded factor file");
        Ok(table)
    }
}

impl std::fmt::Debug for FrenchLibraryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrenchLibraryClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Primary table, restricted to `start` and scaled from percent to fractions.
fn prepare_table(text: &str, start: NaiveDate) -> Result<FactorTable> {
    let table = parse_factor_csv(text)?.since(start)?;
    if table.is_empty() {
        return Err(DataError::unavailable(
            "factor dataset",
            format!("no factor rows on or after {start}"),
        ));
    }
    table.rescaled(PERCENT_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns;
    use approx::assert_relative_eq;
    use std::io::Write;

    const SAMPLE: &str = "Description line\n\n,Mkt-RF,SMB,HML,RF\n\
        201912,    2.77,    0.69,    1.75,    0.14\n\
        202001,    2.34,   -3.10,   -6.25,    0.13\n\n\
        Annual Factors: January-December\n";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_temp(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("navigator-{}-{}", std::process::id(), name));
        std::fs::File::create(&path)
            .unwrap()
            .write_all(bytes)
            .unwrap();
        path
    }

    #[test]
    fn test_dataset_url() {
        let client = FrenchLibraryClient::with_base_url("https://example.com/ftp/").unwrap();
        assert_eq!(
            client.dataset_url(FactorDataset::Monthly),
            "https://example.com/ftp/F-F_Research_Data_Factors_CSV.zip"
        );
        assert_eq!(
            client.dataset_url(FactorDataset::Daily),
            "https://example.com/ftp/F-F_Research_Data_Factors_daily_CSV.zip"
        );
    }

    #[test]
    fn test_prepare_table_scales_percentages() {
        let table = prepare_table(SAMPLE, date(2020, 1, 1)).unwrap();

        assert_eq!(table.len(), 1);
        assert_relative_eq!(table.column(columns::MKT_RF).unwrap()[0], 0.0234, epsilon = 1e-15);
        assert_relative_eq!(table.column(columns::RF).unwrap()[0], 0.0013, epsilon = 1e-15);
    }

    #[test]
    fn test_prepare_table_nothing_after_start() {
        let result = prepare_table(SAMPLE, date(2030, 1, 1));
        assert!(matches!(result, Err(DataError::DataUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_load_csv_file() {
        let path = write_temp("factors.csv", SAMPLE.as_bytes());
        let table = FrenchLibraryClient::load_file(&path, date(2019, 1, 1)).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn test_load_zip_file() {
        let mut buffer = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("F-F_Research_Data_Factors.CSV", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(SAMPLE.as_bytes()).unwrap();
            writer.finish().unwrap();
        }

        let path = write_temp("factors.zip", buffer.get_ref());
        let table = FrenchLibraryClient::load_file(&path, date(2019, 1, 1)).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 2);
        assert_relative_eq!(table.column(columns::SMB).unwrap()[1], -0.031, epsilon = 1e-15);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result =
            FrenchLibraryClient::load_file("/nonexistent/factors.csv", date(2019, 1, 1)).await;
        assert!(matches!(result, Err(DataError::Io(_))));
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_fetch_monthly_factors() {
        let client = FrenchLibraryClient::new().unwrap();
        let table = client
            .fetch_factors(FactorDataset::Monthly, date(2020, 1, 1))
            .await
            .unwrap();
        assert!(table.len() > 12);
        assert!(table.is_period_indexed());
    }
}
