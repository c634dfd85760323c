//! Return series and factor table types.

use crate::columns;
use crate::error::{DataError, Result};
use crate::frame::{date_column, f64_column};
use chrono::{Datelike, Months, NaiveDate};
use polars::prelude::*;
use std::fmt;

/// Time index entry of a factor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Period {
    /// A calendar month, stored as its first day.
    Month(NaiveDate),
    /// A single trading day.
    Day(NaiveDate),
}

impl Period {
    /// Calendar month period. Returns `None` for an invalid month.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::Month)
    }

    /// Parse a French library row key: `YYYYMM` (monthly) or `YYYYMMDD` (daily).
    pub fn parse_key(key: &str) -> Result<Self> {
        let key = key.trim();
        if !key.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DataError::Parse(format!("invalid period key: {key:?}")));
        }

        match key.len() {
            6 => {
                let year: i32 = key[..4]
                    .parse()
                    .map_err(|_| DataError::Parse(format!("invalid year in {key:?}")))?;
                let month: u32 = key[4..]
                    .parse()
                    .map_err(|_| DataError::Parse(format!("invalid month in {key:?}")))?;
                Self::month(year, month)
                    .ok_or_else(|| DataError::Parse(format!("invalid month in {key:?}")))
            }
            8 => NaiveDate::parse_from_str(key, "%Y%m%d")
                .map(Self::Day)
                .map_err(|e| DataError::Parse(format!("invalid date {key:?}: {e}"))),
            _ => Err(DataError::Parse(format!("unsupported period key: {key:?}"))),
        }
    }

    /// Whether this is a multi-day period rather than a single date.
    pub const fn is_span(&self) -> bool {
        matches!(self, Self::Month(_))
    }

    /// Last calendar day of the period.
    pub fn end_date(&self) -> NaiveDate {
        match self {
            Self::Month(first) => first
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(*first),
            Self::Day(date) => *date,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month(first) => write!(f, "{:04}-{:02}", first.year(), first.month()),
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Daily simple returns of one asset.
///
/// Backed by a two-column frame: `date` and a return column named after the
/// ticker. Rows are sorted ascending by date and contain no nulls.
#[derive(Debug, Clone)]
pub struct ReturnSeries {
    name: String,
    frame: DataFrame,
}

impl ReturnSeries {
    /// Build a return series from parallel date and return vectors.
    ///
    /// Rows are sorted by date.
    pub fn new(name: impl Into<String>, dates: Vec<NaiveDate>, returns: Vec<f64>) -> Result<Self> {
        if dates.len() != returns.len() {
            return Err(DataError::LengthMismatch {
                index: dates.len(),
                values: returns.len(),
            });
        }

        let name = name.into();
        if name.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let frame = DataFrame::new(vec![
            Series::new(columns::DATE.into(), dates).into(),
            Series::new(name.as_str().into(), returns).into(),
        ])?
        .sort([columns::DATE], SortMultipleOptions::default())?;

        Ok(Self { name, frame })
    }

    /// Wrap a frame that already holds `date` and a column called `name`.
    pub fn from_frame(name: impl Into<String>, frame: DataFrame) -> Result<Self> {
        let name = name.into();
        let frame = frame
            .lazy()
            .select([col(columns::DATE), col(name.as_str())])
            .sort([columns::DATE], SortMultipleOptions::default())
            .collect()?;

        Ok(Self { name, frame })
    }

    /// Ticker the series is named after.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying frame (`date`, `<name>`).
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Observation dates in ascending order.
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        Ok(date_column(&self.frame, columns::DATE)?)
    }

    /// Return values in date order.
    pub fn values(&self) -> Result<Vec<f64>> {
        Ok(f64_column(&self.frame, &self.name)?)
    }
}

/// Three-factor table with the risk-free rate.
///
/// Columns are `Mkt-RF`, `SMB`, `HML` and `RF`, one row per [`Period`].
#[derive(Debug, Clone)]
pub struct FactorTable {
    periods: Vec<Period>,
    frame: DataFrame,
}

impl FactorTable {
    /// Build a factor table from its index and the four value columns.
    pub fn new(
        periods: Vec<Period>,
        mkt_rf: Vec<f64>,
        smb: Vec<f64>,
        hml: Vec<f64>,
        rf: Vec<f64>,
    ) -> Result<Self> {
        for values in [&mkt_rf, &smb, &hml, &rf] {
            if values.len() != periods.len() {
                return Err(DataError::LengthMismatch {
                    index: periods.len(),
                    values: values.len(),
                });
            }
        }

        let frame = DataFrame::new(vec![
            Series::new(columns::MKT_RF.into(), mkt_rf).into(),
            Series::new(columns::SMB.into(), smb).into(),
            Series::new(columns::HML.into(), hml).into(),
            Series::new(columns::RF.into(), rf).into(),
        ])?;

        Ok(Self { periods, frame })
    }

    /// Time index.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Factor values (no index column).
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Whether the index holds multi-day periods that need normalising to a
    /// point-in-time date before joining.
    pub fn is_period_indexed(&self) -> bool {
        self.periods.iter().any(Period::is_span)
    }

    /// Values of one factor column, in index order.
    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        Ok(f64_column(&self.frame, name)?)
    }

    /// Keep the rows whose period ends on or after `start`.
    pub fn since(&self, start: NaiveDate) -> Result<Self> {
        let keep: Vec<bool> = self.periods.iter().map(|p| p.end_date() >= start).collect();
        let mask = BooleanChunked::from_slice("keep".into(), &keep);

        Ok(Self {
            periods: self
                .periods
                .iter()
                .zip(&keep)
                .filter_map(|(p, k)| k.then_some(*p))
                .collect(),
            frame: self.frame.filter(&mask)?,
        })
    }

    /// Divide every value by `divisor`.
    pub fn rescaled(&self, divisor: f64) -> Result<Self> {
        let frame = self
            .frame
            .clone()
            .lazy()
            .select(
                columns::FACTOR_TABLE
                    .iter()
                    .map(|name| (col(*name) / lit(divisor)).alias(*name))
                    .collect::<Vec<_>>(),
            )
            .collect()?;

        Ok(Self {
            periods: self.periods.clone(),
            frame,
        })
    }

    /// Frame with a leading `date` column holding each period's end date.
    pub fn dated_frame(&self) -> Result<DataFrame> {
        let dates: Vec<NaiveDate> = self.periods.iter().map(Period::end_date).collect();
        let mut frame = self.frame.clone();
        frame.insert_column(0, Series::new(columns::DATE.into(), dates))?;
        Ok(frame)
    }
}
