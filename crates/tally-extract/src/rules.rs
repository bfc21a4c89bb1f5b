//! Label rules for statement line items.
//!
//! Rules are tried in order and the first one with a trigger contained in the
//! label wins, so specific labels must precede broader ones.

use crate::record::FinancialField;

/// Maps line-item labels to the field they report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRule {
    /// Lower-case substrings, any of which selects this rule
    pub triggers: &'static [&'static str],
    /// Field the value is stored into
    pub field: FinancialField,
    /// Columns between the label cell and its value cell, in the same row
    pub offset: usize,
}

impl LabelRule {
    /// Whether a normalized (lower-cased) label selects this rule.
    pub fn matches(&self, label: &str) -> bool {
        self.triggers.iter().any(|trigger| label.contains(trigger))
    }

    /// Index of the value cell for a label at `label_index`.
    pub const fn value_index(&self, label_index: usize) -> usize {
        label_index + self.offset
    }
}

/// Rules in priority order.
pub const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        triggers: &[
            "total net sales",
            "net sales",
            "net revenue",
            "total revenues",
            "revenues",
        ],
        field: FinancialField::TotalNetSales,
        offset: 2,
    },
    LabelRule {
        triggers: &["total cost of sales"],
        field: FinancialField::TotalCostOfSales,
        offset: 1,
    },
    LabelRule {
        triggers: &["total operating expenses"],
        field: FinancialField::TotalOperatingExpenses,
        offset: 1,
    },
    LabelRule {
        triggers: &["basic"],
        field: FinancialField::BasicEarningsPerShare,
        offset: 2,
    },
    LabelRule {
        triggers: &["diluted"],
        field: FinancialField::DilutedEarningsPerShare,
        offset: 2,
    },
];

/// First rule selected by a normalized label, if any.
pub fn match_label(label: &str) -> Option<&'static LabelRule> {
    if label.is_empty() {
        return None;
    }
    LABEL_RULES.iter().find(|rule| rule.matches(label))
}
