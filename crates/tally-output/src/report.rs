//! Per-filing reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_data::edgar::{FilingDescriptor, FormType};
use tally_extract::FinancialRecord;

/// A located filing together with the figures extracted from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingReport {
    /// Form type
    pub form: FormType,
    /// Filing date
    pub filing_date: NaiveDate,
    /// Accession number as listed in the index
    #[serde(rename = "accessionNo")]
    pub accession_number: String,
    /// End of the reported period
    pub report_date: Option<NaiveDate>,
    /// Primary document filename
    #[serde(rename = "primaryDoc")]
    pub primary_document: String,
    /// Extracted figures: empty, or a single record
    pub financial_data: Vec<FinancialRecord>,
}

impl FilingReport {
    /// Combine a filing with its extraction result.
    pub fn new(filing: FilingDescriptor, financial_data: Vec<FinancialRecord>) -> Self {
        Self {
            form: filing.form,
            filing_date: filing.filing_date,
            accession_number: filing.accession_number,
            report_date: filing.report_date,
            primary_document: filing.primary_document,
            financial_data,
        }
    }

    /// The extracted record, if any label matched.
    pub fn record(&self) -> Option<&FinancialRecord> {
        self.financial_data.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filing() -> FilingDescriptor {
        FilingDescriptor {
            form: FormType::TenK,
            filing_date: NaiveDate::from_ymd_opt(2023, 11, 3).unwrap(),
            accession_number: "0000320193-23-000106".to_string(),
            report_date: NaiveDate::from_ymd_opt(2023, 9, 30),
            primary_document: "aapl-20230930.htm".to_string(),
        }
    }

    #[test]
    fn test_report_json_shape() {
        let record = FinancialRecord {
            total_net_sales: Some(383_285_000_000),
            ..Default::default()
        };
        let report = FilingReport::new(filing(), vec![record]);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["form"], "10-K");
        assert_eq!(json["filingDate"], "2023-11-03");
        assert_eq!(json["accessionNo"], "0000320193-23-000106");
        assert_eq!(json["reportDate"], "2023-09-30");
        assert_eq!(json["primaryDoc"], "aapl-20230930.htm");
        assert_eq!(json["financialData"][0]["totalNetSales"], 383_285_000_000_i64);
    }

    #[test]
    fn test_report_without_record() {
        let report = FilingReport::new(filing(), Vec::new());
        assert!(report.record().is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["financialData"], serde_json::json!([]));
    }
}
