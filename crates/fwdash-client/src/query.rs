//! Query URL for the `job_postings` collection.
//!
//! Contract type and ordering are fixed; keyword, remote modes and minimum
//! rate are only sent when set. Remote modes travel as one comma-joined
//! value:
//!
//! ```text
//! /api/job_postings?contracts=contractor&order=date&searchKeywords=rust&remoteMode=full%2Cpartial&minDailySalary=500
//! ```

use fwdash_core::{RemoteMode, SearchFilters};
use reqwest::Url;

use crate::error::ClientError;

pub const CONTRACT_TYPE: &str = "contractor";
pub const SORT_ORDER: &str = "date";

/// Builds the search URL for `keywords` and `filters` on top of `base_url`.
///
/// Pure: the same input always yields the same URL and nothing is sent.
///
/// # Errors
///
/// Returns [`ClientError::InvalidBaseUrl`] if `base_url` is not an absolute
/// http(s) URL.
pub fn build_query(
    base_url: &str,
    keywords: &str,
    filters: &SearchFilters,
) -> Result<Url, ClientError> {
    let mut url = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("contracts", CONTRACT_TYPE);
        pairs.append_pair("order", SORT_ORDER);

        let keywords = keywords.trim();
        if !keywords.is_empty() {
            pairs.append_pair("searchKeywords", keywords);
        }

        let modes = filters.remote_modes();
        if !modes.is_empty() {
            let joined = modes
                .into_iter()
                .map(RemoteMode::as_str)
                .collect::<Vec<_>>()
                .join(",");
            pairs.append_pair("remoteMode", &joined);
        }

        if let Some(min_rate) = filters.effective_min_rate() {
            pairs.append_pair("minDailySalary", &min_rate.to_string());
        }
    }

    Ok(url)
}
