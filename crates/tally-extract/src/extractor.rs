//! Extraction entry points.
//!
//! [`FinancialExtractor::extract`] fetches a filing's primary document and
//! scans it. [`extract_html`] is the network-free half for documents already
//! in hand.

use crate::record::FinancialRecord;
use crate::scan::{Selectors, parse_document, scan_document};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tally_data::edgar::{EdgarClient, FilingDescriptor};
use tally_data::{FetchError, Result};
use tracing::{debug, info, warn};

/// Default number of filings extracted at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Default time budget for one extraction.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Parse and scan an HTML document already in memory.
///
/// Returns an empty list when no label matched, otherwise a single record.
///
/// # Errors
/// Returns `DataError::Parse` if the bytes cannot be interpreted as HTML
///
/// # Example
/// ```
/// # use tally_extract::extract_html;
/// let html = b"<table><tr><td>Net sales</td><td>$</td><td>1,234</td></tr></table>";
/// let records = extract_html(html).unwrap();
/// assert_eq!(records[0].total_net_sales, Some(1_234_000_000));
/// ```
pub fn extract_html(bytes: &[u8]) -> Result<Vec<FinancialRecord>> {
    let selectors = Selectors::new()?;
    let document = parse_document(bytes)?;
    let outcome = scan_document(&document, &selectors);

    if !outcome.warnings.is_empty() {
        debug!(
            warnings = outcome.warnings.len(),
            "scan finished with unreadable values"
        );
    }
    Ok(outcome.into_records())
}

/// Settings for [`FinancialExtractor::extract_filings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Maximum number of extractions in flight
    pub concurrency: usize,
    /// Time budget for each extraction
    pub call_timeout: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

/// Extracts headline figures from filings on EDGAR.
///
/// Holds no per-extraction state; every call builds its own record, so one
/// extractor can serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct FinancialExtractor {
    client: EdgarClient,
}

impl FinancialExtractor {
    /// Create an extractor that fetches through `client`.
    pub const fn new(client: EdgarClient) -> Self {
        Self { client }
    }

    /// The underlying EDGAR client.
    pub const fn client(&self) -> &EdgarClient {
        &self.client
    }

    /// Fetch one filing document and extract its figures.
    ///
    /// # Arguments
    /// * `cik` - Company identifier, used as given in the archive path
    /// * `accession` - Accession number, with or without dashes
    /// * `document` - Primary document filename
    ///
    /// # Returns
    /// An empty list if no label matched, otherwise exactly one record
    ///
    /// # Errors
    /// Returns `DataError::Fetch` if the document cannot be retrieved,
    /// `DataError::Parse` if it cannot be interpreted as HTML, and
    /// `DataError::InvalidSymbol` if an argument is empty
    pub async fn extract(
        &self,
        cik: &str,
        accession: &str,
        document: &str,
    ) -> Result<Vec<FinancialRecord>> {
        let bytes = self.client.fetch_document(cik, accession, document).await?;
        let records = extract_html(&bytes)?;

        info!(
            cik,
            accession,
            document,
            found = !records.is_empty(),
            "extracted filing"
        );
        Ok(records)
    }

    /// Extract the figures of a located filing.
    ///
    /// # Errors
    /// Same as [`Self::extract`]
    pub async fn extract_filing(
        &self,
        cik: &str,
        filing: &FilingDescriptor,
    ) -> Result<Vec<FinancialRecord>> {
        self.extract(cik, &filing.accession_number, &filing.primary_document)
            .await
    }

    /// Extract many filings concurrently.
    ///
    /// Results come back in the order of `filings`. Each extraction is bounded
    /// by `options.call_timeout`; expiry yields `FetchError::Timeout` for that
    /// filing only.
    pub async fn extract_filings(
        &self,
        cik: &str,
        filings: &[FilingDescriptor],
        options: BatchOptions,
    ) -> Vec<Result<Vec<FinancialRecord>>> {
        stream::iter(filings)
            .map(|filing| self.extract_with_timeout(cik, filing, options.call_timeout))
            .buffered(options.concurrency.max(1))
            .collect()
            .await
    }

    async fn extract_with_timeout(
        &self,
        cik: &str,
        filing: &FilingDescriptor,
        after: Duration,
    ) -> Result<Vec<FinancialRecord>> {
        match tokio::time::timeout(after, self.extract_filing(cik, filing)).await {
            Ok(result) => result,
            Err(_) => {
                let url = self
                    .client
                    .document_url(cik, &filing.accession_number, &filing.primary_document);
                warn!(%url, ?after, "extraction timed out");
                Err(FetchError::Timeout { url, after }.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_data::DataError;

    #[test]
    fn test_extract_html_empty_when_nothing_matches() {
        let html = b"<html><body><table><tr><td>Net income</td><td>$</td><td>97</td></tr></table></body></html>";
        assert!(extract_html(html).unwrap().is_empty());
    }

    #[test]
    fn test_extract_html_without_tables() {
        let html = b"<html><body><p>Net sales were $1,234 million.</p></body></html>";
        assert!(extract_html(html).unwrap().is_empty());
    }

    #[test]
    fn test_extract_html_parse_error() {
        let err = extract_html(b"\xc3\x28 no markup").unwrap_err();
        assert!(err.is_parse());
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn test_extract_html_windows_1252_document() {
        let html = b"<html><body><p>Company\x92s results</p><table><tr><td>Net sales</td>\
                     <td>$</td><td>1,234</td></tr></table></body></html>";
        let records = extract_html(html).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total_net_sales, Some(1_234_000_000));
    }

    #[test]
    fn test_batch_options_default() {
        let options = BatchOptions::default();
        assert_eq!(options.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(options.call_timeout, DEFAULT_CALL_TIMEOUT);
    }
}
