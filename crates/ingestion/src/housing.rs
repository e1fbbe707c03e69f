//! Monthly regional house price parsing.
//!
//! The source table carries `State`, `RegionName`, some descriptive columns
//! and one column per calendar month named `YYYY-MM`. Only the identity
//! columns and the month columns are kept. State postal codes are expanded
//! to full names so rows match the university town list.

use crate::states::normalize_state;
use recession_core::{Error, MonthlyPriceTable, Result, YearMonth};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const STATE_COLUMN: &str = "State";
const REGION_COLUMN: &str = "RegionName";

/// Parse a monthly price CSV.
pub fn read_monthly_prices<R: Read>(reader: R) -> Result<MonthlyPriceTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let state_idx = find_column(&headers, STATE_COLUMN)?;
    let region_idx = find_column(&headers, REGION_COLUMN)?;

    // Month columns, in header order
    let month_columns: Vec<(usize, YearMonth)> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| name.parse::<YearMonth>().ok().map(|m| (idx, m)))
        .collect();
    debug!(
        months = month_columns.len(),
        ignored = headers.len() - month_columns.len() - 2,
        "Monthly price columns"
    );

    let mut table = MonthlyPriceTable::new(month_columns.iter().map(|&(_, m)| m).collect());

    for (row_num, record) in rdr.records().enumerate() {
        let record = record?;
        let state = normalize_state(record.get(state_idx).unwrap_or_default());
        let region = record.get(region_idx).unwrap_or_default();

        let prices = month_columns
            .iter()
            .map(|&(idx, month)| parse_price(record.get(idx).unwrap_or_default(), row_num, month))
            .collect::<Result<Vec<_>>>()?;

        table.push_row(state, region, prices)?;
    }

    info!(rows = table.len(), months = table.months.len(), "Loaded monthly prices");
    Ok(table)
}

/// Parse a monthly price CSV file.
pub fn read_monthly_prices_file(path: impl AsRef<Path>) -> Result<MonthlyPriceTable> {
    let file = File::open(path)?;
    read_monthly_prices(file)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::data(format!("missing '{}' column in price table", name)))
}

/// Empty cells are missing values.
fn parse_price(cell: &str, row_num: usize, month: YearMonth) -> Result<Option<f64>> {
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<f64>().map(Some).map_err(|_| {
        Error::data(format!(
            "price row {} month {}: invalid value '{}'",
            row_num + 1,
            month,
            cell
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
RegionID,RegionName,State,Metro,CountyName,SizeRank,1999-12,2000-01,2000-02,2000-03
6181,New York,NY,New York,Queens,1,,100.0,,104.0
12447,Los Angeles,CA,Los Angeles-Long Beach-Anaheim,Los Angeles,2,200.0,210.0,220.0,
";

    #[test]
    fn test_read_monthly_prices() {
        let table = read_monthly_prices(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.months.len(), 4);
        assert_eq!(table.months[0].to_string(), "1999-12");
        assert_eq!(table.len(), 2);

        let ny = &table.rows[0];
        assert_eq!(ny.state, "New York");
        assert_eq!(ny.region, "New York");
        assert_eq!(ny.prices, vec![None, Some(100.0), None, Some(104.0)]);

        let la = &table.rows[1];
        assert_eq!(la.state, "California");
        assert_eq!(la.prices, vec![Some(200.0), Some(210.0), Some(220.0), None]);
    }

    #[test]
    fn test_state_codes_expanded() {
        let csv = "RegionName,State,2000-01\n\
                   Ann Arbor,MI,1.0\n\
                   Athens,OH,2.0\n\
                   Athens,Georgia,3.0\n\
                   Hagatna,ZZ,4.0\n";
        let table = read_monthly_prices(csv.as_bytes()).unwrap();

        let states: Vec<&str> = table.rows.iter().map(|r| r.state.as_str()).collect();
        assert_eq!(states, vec!["Michigan", "Ohio", "Georgia", "ZZ"]);
    }

    #[test]
    fn test_missing_identity_column() {
        let csv = "RegionName,2000-01\nBoston,1.0\n";
        let err = read_monthly_prices(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("State"));
    }

    #[test]
    fn test_invalid_price() {
        let csv = "RegionName,State,2000-01\nBoston,MA,n/a\n";
        let err = read_monthly_prices(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Data(_)));
        assert!(err.to_string().contains("2000-01"));
    }
}
