//! SEC EDGAR access.
//!
//! This module provides:
//! - A rate-limited client for the submissions API and the filing archive
//! - The filing locator, which narrows a company's filing index down to
//!   annual and quarterly reports
//!
//! # Example
//!
//! ```no_run
//! use tally_data::edgar::{EdgarClient, FormType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new()?;
//!     let filings = client.company_filings("320193").await?;
//!
//!     for filing in filings.filter_forms(&[FormType::TenK]) {
//!         let bytes = client
//!             .fetch_document("320193", &filing.accession_number, &filing.primary_document)
//!             .await?;
//!         println!("{} {}: {} bytes", filing.form, filing.filing_date, bytes.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod filings;

pub use client::{EdgarClient, document_url, strip_accession};
pub use filings::{
    CompanyFilings, DEFAULT_FORMS, FilingDescriptor, FilingHistory, FormType, RecentFilings,
};
