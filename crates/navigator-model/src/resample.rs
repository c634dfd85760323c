//! Compounding daily returns to calendar months.

use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use navigator_data::{Period, ReturnSeries};

/// Compound daily returns into one return per calendar month.
///
/// Each month is keyed by its last calendar day so it lines up with monthly
/// factor periods. The first month is dropped: the series starts with the
/// return between its first two closes, so the move from the prior month's
/// close into that month is missing.
pub fn compound_monthly(series: &ReturnSeries) -> Result<ReturnSeries> {
    let dates = series.dates()?;
    let values = series.values()?;

    let mut months: Vec<NaiveDate> = Vec::new();
    let mut growth: Vec<f64> = Vec::new();

    for (date, value) in dates.iter().zip(&values) {
        let month_end = Period::month(date.year(), date.month())
            .map(|p| p.end_date())
            .unwrap_or(*date);

        match months.last() {
            Some(last) if *last == month_end => {
                if let Some(g) = growth.last_mut() {
                    *g *= 1.0 + value;
                }
            }
            _ => {
                months.push(month_end);
                growth.push(1.0 + value);
            }
        }
    }

    let months = months.into_iter().skip(1).collect();
    let returns = growth.into_iter().skip(1).map(|g| g - 1.0).collect();
    Ok(ReturnSeries::new(series.name(), months, returns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_compounds_within_month() {
        let series = ReturnSeries::new(
            "ARKK",
            vec![
                date(2020, 1, 30),
                date(2020, 2, 3),
                date(2020, 2, 28),
                date(2020, 3, 2),
                date(2020, 3, 31),
            ],
            vec![0.05, -0.01, 0.03, 0.02, 0.01],
        )
        .unwrap();

        let monthly = compound_monthly(&series).unwrap();

        assert_eq!(monthly.name(), "ARKK");
        assert_eq!(monthly.dates().unwrap(), vec![date(2020, 2, 29), date(2020, 3, 31)]);
        let values = monthly.values().unwrap();
        assert_relative_eq!(values[0], 0.99 * 1.03 - 1.0, epsilon = 1e-12);
        assert_relative_eq!(values[1], 1.02 * 1.01 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_leading_month_is_dropped() {
        let series = ReturnSeries::new(
            "SPY",
            vec![date(2021, 11, 30), date(2021, 12, 1), date(2021, 12, 31)],
            vec![0.5, 0.004, 0.002],
        )
        .unwrap();

        let monthly = compound_monthly(&series).unwrap();

        assert_eq!(monthly.dates().unwrap(), vec![date(2021, 12, 31)]);
        assert_relative_eq!(monthly.values().unwrap()[0], 1.004 * 1.002 - 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_single_month_leaves_nothing() {
        let series = ReturnSeries::new(
            "SPY",
            vec![date(2021, 12, 30), date(2021, 12, 31)],
            vec![0.004, 0.001],
        )
        .unwrap();
        assert!(compound_monthly(&series).unwrap().is_empty());
    }

    #[test]
    fn test_empty_series() {
        let series = ReturnSeries::new("SPY", vec![], vec![]).unwrap();
        assert!(compound_monthly(&series).unwrap().is_empty());
    }
}
