#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tally/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod extractor;
pub mod normalize;
pub mod record;
pub mod rules;
pub mod scan;

pub use extractor::{BatchOptions, FinancialExtractor, extract_html};
pub use normalize::ValueError;
pub use record::{FinancialField, FinancialRecord};
pub use rules::{LABEL_RULES, LabelRule, match_label};
pub use scan::{
    FieldParseWarning, ScanOutcome, Selectors, decode_document, parse_document, scan_document,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
