//! Extracted financial figures.

use crate::normalize::{ValueError, parse_millions, parse_per_share};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The figures a record can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinancialField {
    /// Total net sales (revenue)
    TotalNetSales,
    /// Total cost of sales
    TotalCostOfSales,
    /// Total operating expenses
    TotalOperatingExpenses,
    /// Basic earnings per share
    BasicEarningsPerShare,
    /// Diluted earnings per share
    DilutedEarningsPerShare,
}

impl FinancialField {
    /// Serialized name of the field.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TotalNetSales => "totalNetSales",
            Self::TotalCostOfSales => "totalCostOfSales",
            Self::TotalOperatingExpenses => "totalOperatingExpenses",
            Self::BasicEarningsPerShare => "basicEarningsPerShare",
            Self::DilutedEarningsPerShare => "dilutedEarningsPerShare",
        }
    }
}

impl fmt::Display for FinancialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Headline figures of one filing.
///
/// Every field is independently optional: `None` means its label was never
/// matched, or every match had an unreadable value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    /// Total net sales, in units
    pub total_net_sales: Option<i64>,
    /// Total cost of sales, in units
    pub total_cost_of_sales: Option<i64>,
    /// Total operating expenses, in units
    pub total_operating_expenses: Option<i64>,
    /// Basic earnings per share
    pub basic_earnings_per_share: Option<f32>,
    /// Diluted earnings per share
    pub diluted_earnings_per_share: Option<f32>,
}

impl FinancialRecord {
    /// Whether at least one field has been populated.
    pub const fn found(&self) -> bool {
        self.total_net_sales.is_some()
            || self.total_cost_of_sales.is_some()
            || self.total_operating_expenses.is_some()
            || self.basic_earnings_per_share.is_some()
            || self.diluted_earnings_per_share.is_some()
    }

    /// Convert `text` as `field` requires and store it, replacing any
    /// previous value.
    ///
    /// Sales and expense fields read whole millions; per-share fields read a
    /// single-precision decimal.
    ///
    /// On error the record is left unchanged.
    ///
    /// # Errors
    /// Returns the conversion failure for the value text
    pub fn apply(&mut self, field: FinancialField, text: &str) -> Result<(), ValueError> {
        match field {
            FinancialField::TotalNetSales => self.total_net_sales = Some(parse_millions(text)?),
            FinancialField::TotalCostOfSales => {
                self.total_cost_of_sales = Some(parse_millions(text)?)
            }
            FinancialField::TotalOperatingExpenses => {
                self.total_operating_expenses = Some(parse_millions(text)?)
            }
            FinancialField::BasicEarningsPerShare => {
                self.basic_earnings_per_share = Some(parse_per_share(text)?)
            }
            FinancialField::DilutedEarningsPerShare => {
                self.diluted_earnings_per_share = Some(parse_per_share(text)?)
            }
        }
        Ok(())
    }

    /// Wrap into the 0-or-1 element list returned by extraction.
    pub fn into_records(self) -> Vec<Self> {
        if self.found() { vec![self] } else { Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_not_found() {
        let record = FinancialRecord::default();
        assert!(!record.found());
        assert!(record.into_records().is_empty());
    }

    #[test]
    fn test_apply_sets_found() {
        let mut record = FinancialRecord::default();
        record.apply(FinancialField::TotalCostOfSales, "567").unwrap();
        assert_eq!(record.total_cost_of_sales, Some(567_000_000));
        assert!(record.found());
        assert_eq!(record.into_records(), vec![record]);
    }

    #[test]
    fn test_apply_overwrites() {
        let mut record = FinancialRecord::default();
        record.apply(FinancialField::BasicEarningsPerShare, "1.10").unwrap();
        record.apply(FinancialField::BasicEarningsPerShare, "2.35").unwrap();
        assert_eq!(record.basic_earnings_per_share, Some(2.35));
    }

    #[test]
    fn test_failed_apply_keeps_previous_value() {
        let mut record = FinancialRecord::default();
        record.apply(FinancialField::TotalNetSales, "1,234").unwrap();
        assert!(record.apply(FinancialField::TotalNetSales, "N/A").is_err());
        assert_eq!(record.total_net_sales, Some(1_234_000_000));

        assert!(record.apply(FinancialField::DilutedEarningsPerShare, "—").is_err());
        assert_eq!(record.diluted_earnings_per_share, None);
    }

    #[test]
    fn test_field_display() {
        assert_eq!(FinancialField::TotalOperatingExpenses.to_string(), "totalOperatingExpenses");
    }

    #[test]
    fn test_serialized_field_names() {
        let record = FinancialRecord {
            total_net_sales: Some(383_285_000_000),
            basic_earnings_per_share: Some(6.16),
            ..Default::default()
        };
        let json = serde_json::to_value(record).unwrap();
        let object = json.as_object().unwrap();

        for field in [
            FinancialField::TotalNetSales,
            FinancialField::TotalCostOfSales,
            FinancialField::TotalOperatingExpenses,
            FinancialField::BasicEarningsPerShare,
            FinancialField::DilutedEarningsPerShare,
        ] {
            assert!(object.contains_key(field.name()), "missing {}", field);
        }
        assert_eq!(json["totalNetSales"], 383_285_000_000_i64);
        assert!(json["totalCostOfSales"].is_null());
    }
}
