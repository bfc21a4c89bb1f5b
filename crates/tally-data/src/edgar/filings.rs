//! SEC EDGAR filing index.
//!
//! This module provides functionality to:
//! - Deserialize a company's filing index from the submissions API
//! - Filter it down to the report forms we extract figures from (10-K, 10-Q)
//! - Describe each kept filing with everything needed to fetch its document

use crate::error::DataError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Forms located when the caller does not choose.
pub const DEFAULT_FORMS: &[FormType] = &[FormType::TenK];

/// Report forms the locator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    /// Annual report
    #[serde(rename = "10-K")]
    TenK,
    /// Quarterly report
    #[serde(rename = "10-Q")]
    TenQ,
    /// Amended annual report
    #[serde(rename = "10-K/A")]
    TenKA,
    /// Amended quarterly report
    #[serde(rename = "10-Q/A")]
    TenQA,
}

impl FormType {
    /// All known forms.
    pub const ALL: [Self; 4] = [Self::TenK, Self::TenQ, Self::TenKA, Self::TenQA];

    /// EDGAR form code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TenK => "10-K",
            Self::TenQ => "10-Q",
            Self::TenKA => "10-K/A",
            Self::TenQA => "10-Q/A",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FormType {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|form| form.code() == code)
            .ok_or_else(|| DataError::InvalidSymbol(format!("unknown form type {:?}", s)))
    }
}

/// Company filings data from SEC EDGAR submissions API.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyFilings {
    /// Central Index Key
    pub cik: String,
    /// Company name
    pub name: String,
    /// Filing history
    pub filings: FilingHistory,
}

/// Container for filing history data.
#[derive(Debug, Clone, Deserialize)]
pub struct FilingHistory {
    /// Recent filings
    pub recent: RecentFilings,
}

/// Recent filings data.
///
/// The SEC API returns filing information as parallel arrays where
/// each index corresponds to a single filing, most recent first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFilings {
    /// Accession numbers (unique filing identifiers)
    #[serde(default)]
    pub accession_number: Vec<String>,
    /// Form types (e.g., "10-K", "10-Q", "8-K")
    #[serde(default)]
    pub form: Vec<String>,
    /// Filing dates in YYYY-MM-DD format
    #[serde(default)]
    pub filing_date: Vec<String>,
    /// Report period dates in YYYY-MM-DD format, empty when not applicable
    #[serde(default)]
    pub report_date: Vec<String>,
    /// Primary documents
    #[serde(default)]
    pub primary_document: Vec<String>,
}

/// One located filing: everything needed to fetch its primary document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingDescriptor {
    /// Form type
    pub form: FormType,
    /// Filing date
    pub filing_date: NaiveDate,
    /// Accession number as listed in the index (with dashes)
    pub accession_number: String,
    /// End of the reported period, when the index lists one
    pub report_date: Option<NaiveDate>,
    /// Primary document filename
    pub primary_document: String,
}

impl CompanyFilings {
    /// Filings whose form is in `forms`, in index order (most recent first).
    ///
    /// Entries with a missing accession number, filing date or primary
    /// document, or with an unparseable filing date, are skipped.
    pub fn filter_forms(&self, forms: &[FormType]) -> Vec<FilingDescriptor> {
        let recent = &self.filings.recent;

        recent
            .form
            .iter()
            .enumerate()
            .filter_map(|(idx, code)| {
                let form = code.parse::<FormType>().ok()?;
                if !forms.contains(&form) {
                    return None;
                }
                self.descriptor_at_index(idx, form)
            })
            .collect()
    }

    /// Build the descriptor at a specific index of the parallel arrays.
    fn descriptor_at_index(&self, idx: usize, form: FormType) -> Option<FilingDescriptor> {
        let recent = &self.filings.recent;

        let (Some(filing_date), Some(accession_number), Some(primary_document)) = (
            recent.filing_date.get(idx),
            recent.accession_number.get(idx),
            recent.primary_document.get(idx),
        ) else {
            warn!(index = idx, %form, "skipping entry due to missing fields");
            return None;
        };

        let filing_date = match NaiveDate::parse_from_str(filing_date, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                warn!(
                    index = idx,
                    %form,
                    %filing_date,
                    "skipping entry with invalid filing date: {}",
                    e
                );
                return None;
            }
        };

        let report_date = recent
            .report_date
            .get(idx)
            .filter(|d| !d.is_empty())
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        Some(FilingDescriptor {
            form,
            filing_date,
            accession_number: accession_number.clone(),
            report_date,
            primary_document: primary_document.clone(),
        })
    }
}
