//! Page-number pagination for the `job_postings` collection.
//!
//! The API pages with 1-based `page` and `itemsPerPage` parameters. The
//! total is known up front from the count request, so every page URL can
//! be built before the first one is sent.

use reqwest::Url;

/// Number of pages needed to cover `total_count` items.
///
/// `ceil(total_count / page_size)`; zero items or a zero page size need no
/// page at all.
#[must_use]
pub fn page_count(total_count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(page_size))
}

/// Appends `page` and `itemsPerPage` to a search URL.
#[must_use]
pub fn page_url(query: &Url, page: u64, page_size: u32) -> Url {
    let mut url = query.clone();
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("itemsPerPage", &page_size.to_string());
    url
}
