//! Parsing of the library's CSV layout.
//!
//! A dataset file starts with free-form description lines, followed by a header
//! row `,Mkt-RF,SMB,HML,RF` and numeric rows keyed by `YYYYMM` or `YYYYMMDD`.
//! The monthly file continues with a blank line and an annual table; the daily
//! file ends with a copyright line. Only the first table is read.

use crate::columns;
use crate::error::{DataError, Result};
use crate::types::{FactorTable, Period};
use std::io::{Cursor, Read};

/// Extract the CSV text of the first entry of a zip archive.
pub fn extract_csv(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut entry = archive.by_index(0)?;
    let mut text = String::new();
    entry.read_to_string(&mut text)?;
    Ok(text)
}

fn is_header(line: &str) -> bool {
    let cells: Vec<&str> = line.split(',').map(str::trim).collect();
    cells.len() == columns::FACTOR_TABLE.len() + 1 && cells[1..] == columns::FACTOR_TABLE
}

fn is_data_row(line: &str) -> bool {
    line.trim_start().starts_with(|c: char| c.is_ascii_digit())
}

/// Parse the primary table of a 3-factor dataset, values left in percent.
pub fn parse_factor_csv(text: &str) -> Result<FactorTable> {
    let lines: Vec<&str> = text.lines().collect();
    let header = lines.iter().position(|line| is_header(line)).ok_or_else(|| {
        DataError::unavailable("factor dataset", "no Mkt-RF/SMB/HML/RF table found")
    })?;

    let body: Vec<&str> = lines[header + 1..]
        .iter()
        .map(|line| line.trim())
        .take_while(|line| is_data_row(line))
        .collect();

    let text = body.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut periods = Vec::with_capacity(body.len());
    let mut values: [Vec<f64>; 4] = Default::default();

    for record in reader.records() {
        let record = record?;
        if record.len() != columns::FACTOR_TABLE.len() + 1 {
            return Err(DataError::Parse(format!(
                "expected {} fields, found {} in row {:?}",
                columns::FACTOR_TABLE.len() + 1,
                record.len(),
                record.get(0).unwrap_or_default()
            )));
        }

        periods.push(Period::parse_key(&record[0])?);
        for (column, field) in values.iter_mut().zip(record.iter().skip(1)) {
            let value: f64 = field
                .parse()
                .map_err(|_| DataError::Parse(format!("invalid factor value {field:?}")))?;
            column.push(value);
        }
    }

    if periods.is_empty() {
        return Err(DataError::unavailable("factor dataset", "factor table is empty"));
    }

    let [mkt_rf, smb, hml, rf] = values;
    FactorTable::new(periods, mkt_rf, smb, hml, rf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const MONTHLY: &str = "This file was created by CMPT_ME_BEME_RETS using the 202401 CRSP database.\r
The 1-month TBill return is from Ibbotson and Associates, Inc.\r
\r
,Mkt-RF,SMB,HML,RF\r
199912,    7.72,    7.04,   -8.87,    0.44\r
200001,   -4.74,    4.44,   -1.89,    0.41\r
200002,    2.45,   21.47,  -10.07,    0.43\r
\r
 Annual Factors: January-December \r
,Mkt-RF,SMB,HML,RF\r
2000,  -17.60,   -1.07,   44.74,    5.89\r
\r
Copyright 2024 Kenneth R. French\r
";

    const DAILY: &str = "This file was created by CMPT_ME_BEME_RETS_DAILY using the 202401 CRSP database.
The Tbill return is the simple daily rate that, over the number of trading days
in the month, compounds to 1-month TBill rate from Ibbotson and Associates Inc.

,Mkt-RF,SMB,HML,RF
20200102,    0.86,   -0.97,   -0.34,    0.006
20200103,   -0.67,    0.30,    0.00,    0.006

Copyright 2024 Kenneth R. French
";

    #[test]
    fn test_parse_monthly_primary_table() {
        let table = parse_factor_csv(MONTHLY).unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.is_period_indexed());
        assert_eq!(table.periods()[1], Period::month(2000, 1).unwrap());
        assert_eq!(table.column(columns::MKT_RF).unwrap(), vec![7.72, -4.74, 2.45]);
        assert_eq!(table.column(columns::SMB).unwrap(), vec![7.04, 4.44, 21.47]);
        assert_eq!(table.column(columns::HML).unwrap(), vec![-8.87, -1.89, -10.07]);
        assert_eq!(table.column(columns::RF).unwrap(), vec![0.44, 0.41, 0.43]);
    }

    #[test]
    fn test_parse_daily_table() {
        let table = parse_factor_csv(DAILY).unwrap();

        assert_eq!(table.len(), 2);
        assert!(!table.is_period_indexed());
        assert_eq!(
            table.periods()[1],
            Period::Day(NaiveDate::from_ymd_opt(2020, 1, 3).unwrap())
        );
        assert_eq!(table.column(columns::RF).unwrap(), vec![0.006, 0.006]);
    }

    #[test]
    fn test_missing_header_is_unavailable() {
        let result = parse_factor_csv("<html>Service Unavailable</html>");
        assert!(matches!(result, Err(DataError::DataUnavailable { .. })));
    }

    #[test]
    fn test_header_without_rows_is_unavailable() {
        let result = parse_factor_csv(",Mkt-RF,SMB,HML,RF\n\nCopyright\n");
        assert!(matches!(result, Err(DataError::DataUnavailable { .. })));
    }

    #[test]
    fn test_malformed_value() {
        let result = parse_factor_csv(",Mkt-RF,SMB,HML,RF\n202001, 1.0, x, 0.1, 0.1\n");
        assert!(matches!(result, Err(DataError::Parse(_))));
    }

    #[test]
    fn test_short_row() {
        let result = parse_factor_csv(",Mkt-RF,SMB,HML,RF\n202001, 1.0, 0.1\n");
        assert!(result.is_err());
    }
}
