//! Adjusted-close history and daily returns from Yahoo Finance.

use crate::columns;
use crate::error::{DataError, Result};
use crate::types::ReturnSeries;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use polars::prelude::*;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

/// First year of history requested when the caller does not pick a start.
pub const DEFAULT_START_YEAR: i32 = 2000;

/// Default start date for price history (2000-01-01).
pub fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(DEFAULT_START_YEAR, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Yahoo Finance quote provider.
pub struct YahooQuoteProvider {
    provider: yahoo::YahooConnector,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider").finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a new Yahoo Finance quote provider.
    pub fn new() -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
        })
    }

    /// Fetch daily adjusted-close prices for a single symbol.
    ///
    /// # Arguments
    /// * `symbol` - The ticker symbol (e.g., "ARKK")
    /// * `start` - First day of history
    /// * `end` - End of history
    ///
    /// # Returns
    /// A Polars DataFrame with columns: date, adjusted_close
    pub async fn fetch_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: DateTime<Utc>,
    ) -> Result<DataFrame> {
        if symbol.trim().is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let start = start.and_time(NaiveTime::MIN).and_utc();
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }

        // Convert chrono DateTime to time::OffsetDateTime
        let start_time = time::OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;
        let end_time = time::OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;

        debug!(symbol, %start, %end, "requesting quote history");
        let response = self
            .provider
            .get_quote_history(symbol, start_time, end_time)
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        if quotes.is_empty() {
            return Err(DataError::unavailable(
                symbol,
                "No data returned from Yahoo Finance",
            ));
        }

        let timestamps: Vec<i64> = quotes.iter().map(|q| q.timestamp as i64).collect();
        let adj_closes: Vec<f64> = quotes.iter().map(|q| q.adjclose).collect();

        let df = DataFrame::new(vec![
            Series::new("timestamp".into(), timestamps).into(),
            Series::new(columns::ADJUSTED_CLOSE.into(), adj_closes).into(),
        ])?;

        // Convert timestamp to date
        let df = df
            .lazy()
            .with_column(
                (col("timestamp") * lit(1_000_000_000))
                    .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                    .cast(DataType::Date)
                    .alias(columns::DATE),
            )
            .select([col(columns::DATE), col(columns::ADJUSTED_CLOSE)])
            .collect()?;

        Ok(df)
    }

    /// Fetch daily simple returns from `start` until now.
    ///
    /// The first observation has no prior price and is dropped. An empty
    /// result is reported as [`DataError::DataUnavailable`].
    pub async fn fetch_returns(&self, symbol: &str, start: NaiveDate) -> Result<ReturnSeries> {
        let prices = self.fetch_prices(symbol, start, Utc::now()).await?;
        returns_from_prices(symbol, prices)
    }

    /// Look up the instrument's short name, falling back to the upper-cased
    /// ticker when the lookup fails or finds nothing.
    pub async fn fetch_display_name(&self, symbol: &str) -> String {
        let fallback = symbol.to_uppercase();

        match self.provider.search_ticker(symbol).await {
            Ok(result) => result
                .quotes
                .into_iter()
                .find(|item| item.symbol.eq_ignore_ascii_case(symbol))
                .map(|item| item.short_name)
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(fallback),
            Err(e) => {
                warn!(symbol, error = %e, "name lookup failed, using ticker");
                fallback
            }
        }
    }
}

/// Convert a price frame (`date`, `adjusted_close`) into simple returns.
///
/// Rows are sorted by date, the percentage change between consecutive rows is
/// taken, and the leading null is dropped. The return column is named after
/// `symbol`.
pub fn returns_from_prices(symbol: &str, prices: DataFrame) -> Result<ReturnSeries> {
    let returns = prices
        .lazy()
        .sort([columns::DATE], SortMultipleOptions::default())
        .with_column(
            (col(columns::ADJUSTED_CLOSE) / col(columns::ADJUSTED_CLOSE).shift(lit(1))
                - lit(1.0))
            .alias(symbol),
        )
        .filter(col(symbol).is_not_null())
        .select([col(columns::DATE), col(symbol)])
        .collect()?;

    if returns.height() == 0 {
        return Err(DataError::unavailable(
            symbol,
            "Not enough price history to compute returns",
        ));
    }

    ReturnSeries::from_frame(symbol, returns)
}
