//! Ticker to CIK lookup from a local CSV file.
//!
//! The file has a header row followed by `cik,ticker[,...]` records; any
//! further columns (company name, exchange) are ignored.

use crate::error::{DataError, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Lookup table for converting ticker symbols to CIK numbers.
#[derive(Debug, Clone, Default)]
pub struct TickerLookup {
    /// Map from upper-cased ticker to CIK
    ticker_to_cik: HashMap<String, String>,
}

impl TickerLookup {
    /// Load the lookup table from a CSV file.
    ///
    /// # Errors
    /// Returns `DataError::Csv` if the file cannot be opened or read
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)?;
        let lookup = Self::from_csv(reader)?;
        debug!(path = %path.display(), tickers = lookup.len(), "loaded ticker table");
        Ok(lookup)
    }

    /// Load the lookup table from any CSV source.
    ///
    /// # Errors
    /// Returns `DataError::Csv` if a record cannot be read
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv(csv::ReaderBuilder::new().flexible(true).from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut ticker_to_cik = HashMap::new();

        for record in reader.records() {
            let record = record?;
            let (Some(cik), Some(ticker)) = (record.get(0), record.get(1)) else {
                continue;
            };
            let (cik, ticker) = (cik.trim(), ticker.trim());
            if cik.is_empty() || ticker.is_empty() {
                continue;
            }
            ticker_to_cik.insert(ticker.to_uppercase(), cik.to_string());
        }

        Ok(Self { ticker_to_cik })
    }

    /// Look up CIK by ticker symbol (case-insensitive).
    pub fn get_cik(&self, ticker: &str) -> Option<&str> {
        self.ticker_to_cik
            .get(&ticker.trim().to_uppercase())
            .map(String::as_str)
    }

    /// Look up CIK by ticker symbol, failing when unknown.
    ///
    /// # Errors
    /// Returns `DataError::InvalidSymbol` for an empty ticker and
    /// `DataError::CikNotFound` when the ticker is not in the table
    pub fn cik_for(&self, ticker: &str) -> Result<&str> {
        if ticker.trim().is_empty() {
            return Err(DataError::InvalidSymbol("Empty ticker".to_string()));
        }
        self.get_cik(ticker)
            .ok_or_else(|| DataError::CikNotFound(ticker.to_string()))
    }

    /// Number of tickers in the table.
    pub fn len(&self) -> usize {
        self.ticker_to_cik.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.ticker_to_cik.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
CIK,Ticker,Name,Exchange
0000320193,AAPL,Apple Inc.,Nasdaq
0000789019,MSFT,Microsoft Corp,Nasdaq
0001652044,goog
,EMPTY
0000000001
";

    #[test]
    fn test_lookup_case_insensitive() {
        let lookup = TickerLookup::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(lookup.get_cik("AAPL"), Some("0000320193"));
        assert_eq!(lookup.get_cik("aapl"), Some("0000320193"));
        assert_eq!(lookup.get_cik("GOOG"), Some("0001652044"));
    }

    #[test]
    fn test_header_and_short_rows_skipped() {
        let lookup = TickerLookup::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(lookup.len(), 3);
        assert!(lookup.get_cik("TICKER").is_none());
        assert!(lookup.get_cik("EMPTY").is_none());
    }

    #[test]
    fn test_cik_for_errors() {
        let lookup = TickerLookup::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(lookup.cik_for("msft").unwrap(), "0000789019");
        assert!(matches!(lookup.cik_for("NOPE"), Err(DataError::CikNotFound(_))));
        assert!(matches!(lookup.cik_for(" "), Err(DataError::InvalidSymbol(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = TickerLookup::from_path("/definitely/not/here.csv");
        assert!(matches!(result, Err(DataError::Csv(_))));
    }
}
