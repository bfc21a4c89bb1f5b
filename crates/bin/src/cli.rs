//! Command-line arguments.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tally::ClientConfig;
use tally::data::edgar::{DEFAULT_FORMS, FormType};
use tally::extract::BatchOptions;
use tally::output::ExportFormat;

/// Default location of the ticker table, relative to the working directory.
const LOCAL_TICKERS_CSV: &str = "data/ticker-to-cik.csv";

/// Headline financial figures from SEC EDGAR filings.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// Application name sent to the SEC (overrides APP_NAME)
    #[arg(long, global = true)]
    pub(crate) app_name: Option<String>,

    /// Contact email sent to the SEC (overrides APP_EMAIL)
    #[arg(long, global = true)]
    pub(crate) email: Option<String>,

    /// HTTP request timeout in seconds (overrides TALLY_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub(crate) timeout_secs: Option<u64>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub(crate) verbose: u8,
}

impl Cli {
    /// Client settings: environment first, then command-line overrides.
    pub(crate) fn client_config(&self) -> tally::Result<ClientConfig> {
        let mut config = ClientConfig::from_env()?;
        if let Some(name) = &self.app_name {
            config.app_name = name.clone();
        }
        if let Some(email) = &self.email {
            config.contact_email = email.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub(crate) const fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn,tally=info,tally_data=info,tally_extract=info,tally_output=info",
            1 => "warn,tally=debug,tally_data=debug,tally_extract=debug,tally_output=debug",
            _ => "info,tally=trace,tally_data=trace,tally_extract=trace,tally_output=trace",
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Locate a company's filings and extract figures from each
    Filings(FilingsArgs),
    /// Extract figures from a single filing document
    Extract(ExtractArgs),
    /// Resolve a ticker to its CIK
    Lookup(LookupArgs),
}

/// Where the company identifier comes from.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub(crate) struct CompanyArgs {
    /// Ticker symbol, resolved through the ticker table
    #[arg(long)]
    pub(crate) ticker: Option<String>,

    /// CIK, used directly
    #[arg(long)]
    pub(crate) cik: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct FilingsArgs {
    #[command(flatten)]
    pub(crate) company: CompanyArgs,

    /// Ticker table (CSV with `cik,ticker` columns)
    #[arg(long)]
    pub(crate) tickers_csv: Option<PathBuf>,

    /// Form types to keep
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_FORMS.to_vec())]
    pub(crate) forms: Vec<FormType>,

    /// Only process the N most recent matching filings
    #[arg(long)]
    pub(crate) limit: Option<usize>,

    /// Output format: json, pretty or csv
    #[arg(long, default_value = "pretty")]
    pub(crate) format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub(crate) output: Option<PathBuf>,

    /// Filings extracted at once
    #[arg(long, default_value_t = BatchOptions::default().concurrency)]
    pub(crate) concurrency: usize,

    /// Time budget per filing, in seconds
    #[arg(
        long,
        default_value_t = BatchOptions::default().call_timeout.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub(crate) call_timeout_secs: u64,
}

impl FilingsArgs {
    pub(crate) const fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            concurrency: self.concurrency,
            call_timeout: Duration::from_secs(self.call_timeout_secs),
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ExtractArgs {
    /// Company CIK
    #[arg(long)]
    pub(crate) cik: String,

    /// Accession number, with or without dashes
    #[arg(long)]
    pub(crate) accession: String,

    /// Primary document filename
    #[arg(long)]
    pub(crate) document: String,
}

#[derive(Debug, Args)]
pub(crate) struct LookupArgs {
    /// Ticker symbol
    #[arg(long)]
    pub(crate) ticker: String,

    /// Ticker table (CSV with `cik,ticker` columns)
    #[arg(long)]
    pub(crate) tickers_csv: Option<PathBuf>,
}

/// Ticker table to use: the explicit path, else `data/ticker-to-cik.csv` in
/// the working directory, else the one under the user data directory.
pub(crate) fn tickers_csv_path(explicit: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path.clone();
    }
    let local = PathBuf::from(LOCAL_TICKERS_CSV);
    if local.exists() {
        return local;
    }
    dirs::data_dir()
        .map(|dir| dir.join("tally").join("ticker-to-cik.csv"))
        .unwrap_or(local)
}
