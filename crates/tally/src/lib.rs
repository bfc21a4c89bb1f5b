#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tally/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export main types from sub-crates
pub use tally_data as data;
pub use tally_extract as extract;
pub use tally_output as output;

pub use tally_data::{ClientConfig, DataError, FetchError, Result};
pub use tally_extract::{FinancialExtractor, FinancialRecord};
pub use tally_output::FilingReport;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
