//! Multi-page posting fetch for `JobBoardClient`.

use futures::stream::{self, StreamExt, TryStreamExt};
use fwdash_core::JobPosting;
use reqwest::Url;

use crate::error::ClientError;
use crate::pagination::page_count;

use super::JobBoardClient;

impl JobBoardClient {
    /// Fetches every posting matching `query`, given the total reported by
    /// [`Self::fetch_count`].
    ///
    /// Pages are requested concurrently, at most `max_concurrent_pages` at a
    /// time, and concatenated in page order whatever order they complete in.
    ///
    /// **All-or-nothing semantics**: the first failing page aborts the fetch
    /// and postings from pages that already succeeded are discarded.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::fetch_page`].
    pub async fn fetch_all(
        &self,
        query: &Url,
        total_count: u64,
    ) -> Result<Vec<JobPosting>, ClientError> {
        let pages = page_count(total_count, self.page_size);
        if pages == 0 {
            tracing::debug!(total_count, "nothing to fetch");
            return Ok(Vec::new());
        }

        let per_page: Vec<Vec<JobPosting>> = stream::iter(1..=pages)
            .map(|page| self.fetch_page(query, page))
            .buffered(self.max_concurrent_pages)
            .try_collect()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "postings fetch failed"))?;

        let postings: Vec<JobPosting> = per_page.into_iter().flatten().collect();
        tracing::info!(
            pages,
            total_count,
            fetched = postings.len(),
            "fetched all postings"
        );
        Ok(postings)
    }
}
