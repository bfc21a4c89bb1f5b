//! SEC EDGAR API client with rate limiting.

use super::filings::CompanyFilings;
use crate::config::ClientConfig;
use crate::error::{DataError, FetchError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Rate limiter to ensure we don't exceed SEC's rate limits
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// Remove the `-` separators from an accession number.
///
/// The archive path embeds accession numbers without separators.
///
/// # Example
/// ```
/// # use tally_data::edgar::strip_accession;
/// assert_eq!(strip_accession("0001234567-24-000123"), "000123456724000123");
/// ```
pub fn strip_accession(accession: &str) -> String {
    accession.replace('-', "")
}

/// Build the archive URL of a filing document.
///
/// The identifier is used as given; the accession number has its dashes
/// removed.
///
/// # Example
/// ```
/// # use tally_data::edgar::document_url;
/// let url = document_url("https://www.sec.gov", "320193", "0000320193-23-000106", "aapl-20230930.htm");
/// assert_eq!(
///     url,
///     "https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/aapl-20230930.htm"
/// );
/// ```
pub fn document_url(archive_base: &str, cik: &str, accession: &str, document: &str) -> String {
    format!(
        "{}/Archives/edgar/data/{}/{}/{}",
        archive_base.trim_end_matches('/'),
        cik,
        strip_accession(accession),
        document
    )
}

/// SEC EDGAR API client with rate limiting
///
/// Cloning is cheap: clones share the connection pool and the rate limiter.
#[derive(Clone)]
pub struct EdgarClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    config: ClientConfig,
}

impl EdgarClient {
    /// Create a new EDGAR client with default settings (10 req/sec)
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new EDGAR client from explicit settings
    ///
    /// # Errors
    /// Returns `DataError::Config` if the settings are invalid, or
    /// `DataError::Client` if the HTTP client cannot be built
    ///
    /// # Example
    /// ```no_run
    /// use std::time::Duration;
    /// use tally_data::{ClientConfig, edgar::EdgarClient};
    ///
    /// # fn example() -> tally_data::Result<()> {
    /// let config = ClientConfig::default()
    ///     .with_identity("ResearchDesk/2.0", "desk@example.com")
    ///     .with_min_interval(Duration::from_millis(200));
    /// let client = EdgarClient::with_config(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Client)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.min_interval))),
            config,
        })
    }

    /// Settings this client was built with.
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Archive URL of a filing document, as fetched by [`Self::fetch_document`].
    pub fn document_url(&self, cik: &str, accession: &str, document: &str) -> String {
        document_url(&self.config.archive_base_url, cik, accession, document)
    }

    /// Get a company's filing index from the submissions API
    ///
    /// # Arguments
    /// * `cik` - Company's CIK number (with or without zero padding)
    ///
    /// # Errors
    /// Returns `DataError::Fetch` if the request fails and
    /// `DataError::Serialization` if the index is not the expected JSON
    pub async fn company_filings(&self, cik: &str) -> Result<CompanyFilings> {
        if cik.is_empty() {
            return Err(DataError::InvalidSymbol("Empty CIK".to_string()));
        }

        // Ensure CIK is zero-padded to 10 digits
        let cik_padded = format!("{:0>10}", cik);
        let url = format!(
            "{}/submissions/CIK{}.json",
            self.config.data_base_url, cik_padded
        );

        let body = self.get_bytes(&url).await?;
        let filings: CompanyFilings = serde_json::from_slice(&body)?;

        debug!(
            cik = %cik_padded,
            entries = filings.filings.recent.form.len(),
            "fetched filing index"
        );
        Ok(filings)
    }

    /// Fetch the raw bytes of a filing document
    ///
    /// # Arguments
    /// * `cik` - Company's CIK number, used as given in the archive path
    /// * `accession` - Accession number (e.g., "0000320193-23-000106")
    /// * `document` - Document filename (e.g., "aapl-20230930.htm")
    ///
    /// # Errors
    /// Returns `DataError::InvalidSymbol` if any argument is empty, before any
    /// request is made, and `DataError::Fetch` on network failure,
    /// non-success status or unreadable body
    pub async fn fetch_document(
        &self,
        cik: &str,
        accession: &str,
        document: &str,
    ) -> Result<Vec<u8>> {
        if cik.is_empty() {
            return Err(DataError::InvalidSymbol("Empty CIK".to_string()));
        }
        if accession.is_empty() {
            return Err(DataError::InvalidSymbol("Empty accession number".to_string()));
        }
        if document.is_empty() {
            return Err(DataError::InvalidSymbol("Empty document name".to_string()));
        }

        let url = self.document_url(cik, accession, document);
        Ok(self.get_bytes(&url).await?)
    }

    /// Rate-limited GET returning the full body.
    async fn get_bytes(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
        self.rate_limiter.lock().await.wait().await;

        debug!(%url, "GET");
        let response = self.client.get(url).send().await.map_err(|source| {
            if source.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    after: self.config.timeout,
                }
            } else {
                FetchError::Network {
                    url: url.to_string(),
                    source,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        debug!(%url, bytes = body.len(), "received body");
        Ok(body.to_vec())
    }
}

impl std::fmt::Debug for EdgarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgarClient")
            .field("user_agent", &self.config.user_agent())
            .field("archive_base_url", &self.config.archive_base_url)
            .finish_non_exhaustive()
    }
}
