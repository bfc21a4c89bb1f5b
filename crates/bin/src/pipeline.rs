//! Locate-then-extract pipeline behind `tally filings`.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tally::data::edgar::{FilingDescriptor, FormType};
use tally::extract::{BatchOptions, FinancialExtractor};
use tally::output::FilingReport;
use tally::{DataError, FinancialRecord};
use tracing::{info, warn};

/// Locate filings of the given forms and extract figures from each.
///
/// A filing whose extraction fails is logged and reported with no figures;
/// only a failure to fetch the filing index aborts the run.
pub(crate) async fn collect_reports(
    extractor: &FinancialExtractor,
    cik: &str,
    forms: &[FormType],
    limit: Option<usize>,
    options: BatchOptions,
) -> tally::Result<Vec<FilingReport>> {
    let index = extractor.client().company_filings(cik).await?;
    let mut filings: Vec<FilingDescriptor> = index.filter_forms(forms);
    if let Some(limit) = limit {
        filings.truncate(limit);
    }

    info!(
        company = %index.name,
        cik,
        filings = filings.len(),
        "located filings"
    );

    let progress = spinner(filings.len());
    let results = extractor.extract_filings(cik, &filings, options).await;
    progress.finish_and_clear();

    let reports = filings
        .into_iter()
        .zip(results)
        .map(|(filing, result)| report_for(filing, result))
        .collect();

    Ok(reports)
}

/// Report for one filing; a failed extraction yields no figures.
fn report_for(
    filing: FilingDescriptor,
    result: tally::Result<Vec<FinancialRecord>>,
) -> FilingReport {
    let records = match result {
        Ok(records) => records,
        Err(DataError::Fetch(e)) => {
            warn!(
                accession = %filing.accession_number,
                url = e.url(),
                "could not fetch filing: {}",
                e
            );
            Vec::new()
        }
        Err(e) => {
            warn!(
                accession = %filing.accession_number,
                document = %filing.primary_document,
                "extraction failed: {}",
                e
            );
            Vec::new()
        }
    };
    FilingReport::new(filing, records)
}

fn spinner(filings: usize) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        progress.set_style(style);
    }
    progress.set_message(format!("extracting {} filings", filings));
    progress.enable_steady_tick(Duration::from_millis(120));
    progress
}
