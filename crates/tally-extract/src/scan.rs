//! Table scan over a parsed filing document.
//!
//! Tables, rows and cells are visited in document order. Each row's `<td>`
//! cells are matched against [`LABEL_RULES`](crate::rules::LABEL_RULES); a
//! matched label reads its value from a cell further along the same row. All
//! matches fold into a single [`FinancialRecord`], later ones overwriting
//! earlier ones, and the scan always runs to the end of the document.

use crate::normalize::{ValueError, normalize_label};
use crate::record::{FinancialField, FinancialRecord};
use crate::rules::match_label;
use encoding_rs::WINDOWS_1252;
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use std::fmt;
use tally_data::{DataError, Result};
use tracing::{debug, trace, warn};

/// Compiled selectors for the elements the scan visits.
#[derive(Debug, Clone)]
pub struct Selectors {
    table: Selector,
    row: Selector,
    cell: Selector,
}

impl Selectors {
    /// Compile the `table`, `tr` and `td` selectors.
    ///
    /// # Errors
    /// Returns `DataError::Parse` if a selector fails to compile
    pub fn new() -> Result<Self> {
        Ok(Self {
            table: compile("table")?,
            row: compile("tr")?,
            cell: compile("td")?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| DataError::Parse(format!("invalid selector {:?}: {}", selector, e)))
}

/// A matched label whose value cell could not be converted.
///
/// Not fatal: the field keeps its previous value and the scan continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldParseWarning {
    /// Field the value was meant for
    pub field: FinancialField,
    /// Table index in document order
    pub table: usize,
    /// Row index within the table
    pub row: usize,
    /// Text of the value cell
    pub text: String,
    /// Conversion failure
    pub error: ValueError,
}

impl fmt::Display for FieldParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not parse {} from {:?} (table {}, row {}): {}",
            self.field, self.text, self.table, self.row, self.error
        )
    }
}

/// Result of scanning one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    /// The accumulated record
    pub record: FinancialRecord,
    /// Value cells that failed conversion
    pub warnings: Vec<FieldParseWarning>,
}

impl ScanOutcome {
    /// The 0-or-1 element record list for this document.
    pub fn into_records(self) -> Vec<FinancialRecord> {
        self.record.into_records()
    }
}

/// Decode document bytes as UTF-8, falling back to Windows-1252.
///
/// EDGAR documents are mostly UTF-8 or ASCII, but older filings carry stray
/// Windows-1252 bytes (0x92 apostrophes, 0xA0 spaces). Windows-1252 maps every
/// byte, so decoding never fails.
pub fn decode_document(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(e) => {
            debug!(
                valid_up_to = e.valid_up_to(),
                "document is not UTF-8, decoding as Windows-1252"
            );
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    }
}

/// Parse document bytes as HTML.
///
/// The HTML parser recovers from malformed markup, so only input without any
/// markup is rejected.
///
/// # Errors
/// Returns `DataError::Parse` if the document is empty or contains no markup
pub fn parse_document(bytes: &[u8]) -> Result<Html> {
    let text = decode_document(bytes);

    if text.trim().is_empty() {
        return Err(DataError::Parse("document is empty".to_string()));
    }
    if !text.contains('<') {
        return Err(DataError::Parse("document contains no markup".to_string()));
    }

    Ok(Html::parse_document(&text))
}

/// Scan every table of `document` into a single record.
pub fn scan_document(document: &Html, selectors: &Selectors) -> ScanOutcome {
    document
        .select(&selectors.table)
        .enumerate()
        .fold(ScanOutcome::default(), |outcome, (table_idx, table)| {
            table
                .select(&selectors.row)
                .enumerate()
                .fold(outcome, |outcome, (row_idx, row)| {
                    scan_row(outcome, row, selectors, table_idx, row_idx)
                })
        })
}

fn scan_row(
    mut outcome: ScanOutcome,
    row: ElementRef<'_>,
    selectors: &Selectors,
    table: usize,
    row_idx: usize,
) -> ScanOutcome {
    let cells: Vec<String> = row
        .select(&selectors.cell)
        .map(|cell| cell.text().collect())
        .collect();

    for (idx, cell) in cells.iter().enumerate() {
        let label = normalize_label(cell);
        let Some(rule) = match_label(&label) else {
            continue;
        };

        let Some(value) = cells.get(rule.value_index(idx)) else {
            trace!(
                field = %rule.field,
                table,
                row = row_idx,
                "value cell beyond end of row"
            );
            continue;
        };

        if let Err(error) = outcome.record.apply(rule.field, value) {
            let warning = FieldParseWarning {
                field: rule.field,
                table,
                row: row_idx,
                text: value.trim().to_string(),
                error,
            };
            warn!("{}", warning);
            outcome.warnings.push(warning);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(html: &str) -> ScanOutcome {
        let selectors = Selectors::new().unwrap();
        let document = parse_document(html.as_bytes()).unwrap();
        scan_document(&document, &selectors)
    }

    fn table(rows: &[&[&str]]) -> String {
        let body: String = rows
            .iter()
            .map(|cells| {
                let tds: String = cells.iter().map(|c| format!("<td>{}</td>", c)).collect();
                format!("<tr>{}</tr>", tds)
            })
            .collect();
        format!("<table>{}</table>", body)
    }

    #[test]
    fn test_label_with_markup_and_whitespace() {
        let outcome = scan(
            "<table><tr><td><span>  Net <b>sales</b> </span></td><td>$</td>\
             <td><p>383,285</p></td></tr></table>",
        );
        assert_eq!(outcome.record.total_net_sales, Some(383_285_000_000));
    }

    #[test]
    fn test_header_cells_are_not_labels() {
        let outcome =
            scan("<table><tr><th>Net sales</th><td></td><td>1</td><td>2</td></tr></table>");
        assert!(!outcome.record.found());
    }

    #[test]
    fn test_value_cell_is_relative_to_label() {
        let html = table(&[&["", "Total cost of sales", "214,137", "223,546"]]);
        let outcome = scan(&html);
        assert_eq!(outcome.record.total_cost_of_sales, Some(214_137_000_000));
    }

    #[test]
    fn test_later_row_overwrites() {
        let html = table(&[
            &["Products net sales", "$", "298,085"],
            &["Total net sales", "$", "383,285"],
        ]);
        let outcome = scan(&html);
        assert_eq!(outcome.record.total_net_sales, Some(383_285_000_000));
    }

    #[test]
    fn test_failed_value_keeps_earlier_match() {
        let html = table(&[&["Diluted", "$", "6.13"], &["Diluted", "$", "n/m"]]);
        let outcome = scan(&html);

        assert_eq!(outcome.record.diluted_earnings_per_share, Some(6.13));
        assert_eq!(outcome.warnings.len(), 1);
        let warning = &outcome.warnings[0];
        assert_eq!(warning.field, FinancialField::DilutedEarningsPerShare);
        assert_eq!((warning.table, warning.row), (0, 1));
        assert_eq!(warning.text, "n/m");
    }

    #[test]
    fn test_value_cell_can_itself_be_a_label() {
        // "Basic" on its own row reads two cells on; that cell mentions
        // "diluted" and is matched in turn, running off the end of the row.
        let html = table(&[&["Basic", "", "diluted", "1.00"]]);
        let outcome = scan(&html);

        assert_eq!(outcome.record.basic_earnings_per_share, None);
        assert_eq!(outcome.record.diluted_earnings_per_share, None);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].field, FinancialField::BasicEarningsPerShare);
    }

    #[test]
    fn test_decode_document_windows_1252_fallback() {
        assert_eq!(decode_document(b"Apple\xe2\x80\x99s"), "Apple\u{2019}s");
        assert_eq!(decode_document(b"Apple\x92s"), "Apple\u{2019}s");
        assert_eq!(decode_document(b"1\xa0234"), "1\u{a0}234");
        assert!(matches!(decode_document(b"plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_stray_windows_1252_byte_still_scans() {
        let bytes = b"<html><body><p>Company\x92s results</p><table><tr><td>Net sales</td>\
                      <td>$</td><td>1,234</td></tr></table></body></html>";
        let selectors = Selectors::new().unwrap();
        let document = parse_document(bytes).unwrap();
        let outcome = scan_document(&document, &selectors);

        assert_eq!(outcome.record.total_net_sales, Some(1_234_000_000));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_parse_document_rejects_non_html() {
        assert!(matches!(
            parse_document(&[0xff, 0xfe, 0x00]),
            Err(DataError::Parse(_))
        ));
        assert!(matches!(parse_document(b"   \n"), Err(DataError::Parse(_))));
        assert!(matches!(
            parse_document(b"plain text filing"),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_document_recovers_from_malformed_markup() {
        let outcome = scan("<table><tr><td>Net sales<td><td>12</table");
        assert_eq!(outcome.record.total_net_sales, Some(12_000_000));
    }

    #[test]
    fn test_warning_display() {
        let html = table(&[&["Total operating expenses", "N/A"]]);
        let outcome = scan(&html);
        let message = outcome.warnings[0].to_string();
        assert!(message.starts_with("could not parse totalOperatingExpenses from \"N/A\""));
    }
}
