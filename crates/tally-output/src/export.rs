//! Export functionality for filing reports.
//!
//! JSON keeps the nested report shape. CSV flattens each report into one row
//! with a column per extracted figure; figures that were not found are empty.

use crate::report::FilingReport;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tally_data::edgar::FormType;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output was not valid UTF-8.
    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty" | "pretty-json" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// One CSV row per report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FilingReportFlat<'a> {
    form: FormType,
    filing_date: NaiveDate,
    accession_no: &'a str,
    report_date: Option<NaiveDate>,
    primary_doc: &'a str,
    total_net_sales: Option<i64>,
    total_cost_of_sales: Option<i64>,
    total_operating_expenses: Option<i64>,
    basic_earnings_per_share: Option<f32>,
    diluted_earnings_per_share: Option<f32>,
}

impl<'a> From<&'a FilingReport> for FilingReportFlat<'a> {
    fn from(report: &'a FilingReport) -> Self {
        let record = report.record().copied().unwrap_or_default();
        Self {
            form: report.form,
            filing_date: report.filing_date,
            accession_no: &report.accession_number,
            report_date: report.report_date,
            primary_doc: &report.primary_document,
            total_net_sales: record.total_net_sales,
            total_cost_of_sales: record.total_cost_of_sales,
            total_operating_expenses: record.total_operating_expenses,
            basic_earnings_per_share: record.basic_earnings_per_share,
            diluted_earnings_per_share: record.diluted_earnings_per_share,
        }
    }
}

fn write_csv<'a>(
    reports: impl IntoIterator<Item = &'a FilingReport>,
) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for report in reports {
        wtr.serialize(FilingReportFlat::from(report))?;
    }
    let data = String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?)?;
    Ok(data)
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for FilingReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv([self]),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<FilingReport> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv(self),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
