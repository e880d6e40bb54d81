//! HTTP client for the Free-Work `job_postings` API.

mod count;
mod fetch_all;

use std::time::Duration;

use fwdash_core::{AppConfig, JobPosting};
use reqwest::{Client, Url};

use crate::error::ClientError;
use crate::pagination::page_url;

use count::extract_total;

const JSON: &str = "application/json";
const JSON_LD: &str = "application/ld+json";

/// HTTP client for the job postings collection.
///
/// Non-2xx responses become [`ClientError::UnexpectedStatus`] and bodies
/// that are not JSON arrays become [`ClientError::Deserialize`]. Nothing is
/// retried.
pub struct JobBoardClient {
    client: Client,
    page_size: u32,
    /// Upper bound on page requests in flight during [`Self::fetch_all`].
    max_concurrent_pages: usize,
}

impl JobBoardClient {
    /// Creates a `JobBoardClient` with the given timeout, `User-Agent`, page
    /// size and fan-out bound.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        page_size: u32,
        max_concurrent_pages: usize,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            page_size,
            max_concurrent_pages: max_concurrent_pages.max(1),
        })
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.page_size,
            config.max_concurrent_pages,
        )
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetches one page (1-based) of postings for `query`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ClientError::Http`] on network or TLS failure.
    /// - [`ClientError::Deserialize`] if the body is not a JSON array.
    ///
    /// Records that do not match the posting schema are dropped with a
    /// warning; the rest of the page is kept.
    pub async fn fetch_page(&self, query: &Url, page: u64) -> Result<Vec<JobPosting>, ClientError> {
        let url = page_url(query, page, self.page_size);
        let body = self.get_text(url.clone(), JSON).await?;

        let records = serde_json::from_str::<Vec<serde_json::Value>>(&body).map_err(|e| {
            ClientError::Deserialize {
                context: format!("postings page {page} from {url}"),
                source: e,
            }
        })?;
        let postings = decode_postings(page, records);

        tracing::debug!(page, count = postings.len(), "fetched postings page");
        Ok(postings)
    }

    /// Total number of postings matching `query`.
    ///
    /// Requests a single item per page and reads the collection total from
    /// the JSON-LD envelope.
    ///
    /// # Errors
    ///
    /// - [`ClientError::UnexpectedStatus`], [`ClientError::Http`] as for
    ///   [`Self::fetch_page`].
    /// - [`ClientError::Deserialize`] if the body is not JSON.
    /// - [`ClientError::MissingCount`] if the body carries no total.
    pub async fn fetch_count(&self, query: &Url) -> Result<u64, ClientError> {
        let mut url = query.clone();
        url.query_pairs_mut().append_pair("itemsPerPage", "1");

        let body = self.get_text(url.clone(), JSON_LD).await?;
        let value = serde_json::from_str::<serde_json::Value>(&body).map_err(|e| {
            ClientError::Deserialize {
                context: format!("count from {url}"),
                source: e,
            }
        })?;

        let total = extract_total(&value).ok_or_else(|| ClientError::MissingCount {
            url: url.to_string(),
        })?;
        tracing::debug!(total, "fetched mission count");
        Ok(total)
    }

    async fn get_text(&self, url: Url, accept: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Decodes each record of a page on its own, skipping the ones that fail.
fn decode_postings(page: u64, records: Vec<serde_json::Value>) -> Vec<JobPosting> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("id").map(ToString::to_string);
            match serde_json::from_value::<JobPosting>(record) {
                Ok(posting) => Some(posting),
                Err(e) => {
                    tracing::warn!(
                        page,
                        id = id.as_deref().unwrap_or("?"),
                        error = %e,
                        "skipping malformed posting"
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
