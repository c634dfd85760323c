//! Input data sources used by the pipeline.

use chrono::NaiveDate;
use navigator_data::{
    FactorDataset, FactorTable, FrenchLibraryClient, Result, ReturnSeries, YahooQuoteProvider,
};
use std::future::Future;
use std::path::PathBuf;
use tracing::warn;

/// Daily returns and display names for tickers.
pub trait ReturnSource {
    /// Daily simple returns from `start` to now.
    fn returns(
        &self,
        symbol: &str,
        start: NaiveDate,
    ) -> impl Future<Output = Result<ReturnSeries>> + Send;

    /// Human-readable instrument name. Never fails; falls back to the ticker.
    fn display_name(&self, symbol: &str) -> impl Future<Output = String> + Send;
}

/// Fama/French factor tables.
pub trait FactorSource {
    /// Factor table scaled to fractions, periods ending on or after `start`.
    fn factors(
        &self,
        dataset: FactorDataset,
        start: NaiveDate,
    ) -> impl Future<Output = Result<FactorTable>> + Send;
}

impl ReturnSource for YahooQuoteProvider {
    async fn returns(&self, symbol: &str, start: NaiveDate) -> Result<ReturnSeries> {
        self.fetch_returns(symbol, start).await
    }

    async fn display_name(&self, symbol: &str) -> String {
        self.fetch_display_name(symbol).await
    }
}

impl FactorSource for FrenchLibraryClient {
    async fn factors(&self, dataset: FactorDataset, start: NaiveDate) -> Result<FactorTable> {
        self.fetch_factors(dataset, start).await
    }
}

/// Factors from the online library or from a local copy.
#[derive(Debug)]
pub enum FactorLoader {
    /// Download from the data library.
    Remote(FrenchLibraryClient),
    /// Read a local `.zip` or `.csv` file. The file's own layout wins over
    /// the requested dataset; a mismatch is logged.
    File(PathBuf),
}

impl FactorSource for FactorLoader {
    async fn factors(&self, dataset: FactorDataset, start: NaiveDate) -> Result<FactorTable> {
        match self {
            Self::Remote(client) => client.fetch_factors(dataset, start).await,
            Self::File(path) => {
                let table = FrenchLibraryClient::load_file(path, start).await?;
                if !dataset.matches(&table) {
                    warn!(
                        path = %path.display(),
                        requested = %dataset,
                        "factor file layout does not match the requested frequency"
                    );
                }
                Ok(table)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DAILY: &str = ",Mkt-RF,SMB,HML,RF\n\
        20200102,    0.86,   -0.97,   -0.34,    0.006\n\
        20200103,   -0.67,    0.30,    0.00,    0.006\n";

    #[tokio::test]
    async fn test_file_layout_wins_over_requested_dataset() {
        let path = std::env::temp_dir()
            .join(format!("navigator-sources-{}.csv", std::process::id()));
        std::fs::File::create(&path)
            .unwrap()
            .write_all(DAILY.as_bytes())
            .unwrap();

        let loader = FactorLoader::File(path.clone());
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let table = loader.factors(FactorDataset::Monthly, start).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 2);
        assert!(!FactorDataset::Monthly.matches(&table));
        assert!(FactorDataset::Daily.matches(&table));
    }
}
