//! Helpers for reading typed columns out of polars frames.

use polars::prelude::*;

/// Read a `Date` column, failing on nulls.
pub fn date_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<chrono::NaiveDate>> {
    df.column(name)?
        .as_materialized_series()
        .date()?
        .as_date_iter()
        .map(|value| {
            value.ok_or_else(|| {
                PolarsError::ComputeError(format!("null value in column '{name}'").into())
            })
        })
        .collect()
}

/// Read a `Float64` column, failing on nulls.
pub fn f64_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    df.column(name)?
        .as_materialized_series()
        .f64()?
        .into_iter()
        .map(|value| {
            value.ok_or_else(|| {
                PolarsError::ComputeError(format!("null value in column '{name}'").into())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_reads_dates_and_values() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        ];
        let df = DataFrame::new(vec![
            Series::new("date".into(), dates.clone()).into(),
            Series::new("x".into(), vec![0.5, -0.25]).into(),
        ])
        .unwrap();

        assert_eq!(date_column(&df, "date").unwrap(), dates);
        assert_eq!(f64_column(&df, "x").unwrap(), vec![0.5, -0.25]);
    }

    #[test]
    fn test_null_is_an_error() {
        let df = DataFrame::new(vec![
            Series::new("x".into(), vec![Some(1.0), None]).into(),
        ])
        .unwrap();

        assert!(f64_column(&df, "x").is_err());
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let df = DataFrame::new(vec![Series::new("x".into(), vec![1.0]).into()]).unwrap();
        assert!(f64_column(&df, "y").is_err());
    }
}
