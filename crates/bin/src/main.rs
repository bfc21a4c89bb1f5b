//! Tally CLI binary.
//!
//! Locates a company's EDGAR filings and extracts headline figures from them.

mod cli;
mod pipeline;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, ExtractArgs, FilingsArgs, LookupArgs, tickers_csv_path};
use std::path::PathBuf;
use std::process;
use tally::FinancialExtractor;
use tally::data::edgar::EdgarClient;
use tally::data::tickers::TickerLookup;
use tally::output::Exporter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Filings(args) => filings(&cli, args).await,
        Command::Extract(args) => extract(&cli, args).await,
        Command::Lookup(args) => lookup(args),
    }
}

fn extractor(cli: &Cli) -> Result<FinancialExtractor> {
    let config = cli
        .client_config()
        .context("invalid client configuration")?;
    let client = EdgarClient::with_config(config)?;
    Ok(FinancialExtractor::new(client))
}

async fn filings(cli: &Cli, args: &FilingsArgs) -> Result<()> {
    let cik = match (&args.company.cik, &args.company.ticker) {
        (Some(cik), _) => cik.trim().to_string(),
        (None, Some(ticker)) => resolve_ticker(ticker, args.tickers_csv.as_ref())?,
        (None, None) => anyhow::bail!("either --ticker or --cik is required"),
    };

    let extractor = extractor(cli)?;
    let reports = pipeline::collect_reports(
        &extractor,
        &cik,
        &args.forms,
        args.limit,
        args.batch_options(),
    )
    .await
    .with_context(|| format!("failed to locate filings for CIK {}", cik))?;

    match &args.output {
        Some(path) => {
            reports
                .export_to_file(path, args.format)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {} filings to {}", reports.len(), path.display());
        }
        None => println!("{}", reports.export_to_string(args.format)?),
    }
    Ok(())
}

async fn extract(cli: &Cli, args: &ExtractArgs) -> Result<()> {
    let records = extractor(cli)?
        .extract(&args.cik, &args.accession, &args.document)
        .await
        .with_context(|| format!("failed to extract {}", args.document))?;

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn lookup(args: &LookupArgs) -> Result<()> {
    let cik = resolve_ticker(&args.ticker, args.tickers_csv.as_ref())?;
    println!("{}", cik);
    Ok(())
}

fn resolve_ticker(ticker: &str, tickers_csv: Option<&PathBuf>) -> Result<String> {
    let path = tickers_csv_path(tickers_csv);
    let lookup = TickerLookup::from_path(&path)
        .with_context(|| format!("failed to load ticker table {}", path.display()))?;
    Ok(lookup.cik_for(ticker)?.to_string())
}
