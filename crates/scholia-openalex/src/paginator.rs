//! Cursor pagination for one author's complete works list

use scholia_core::PermitPool;

use crate::api::ApiClient;
use crate::work::WorkRow;

/// Start sentinel for cursor pagination
pub const START_CURSOR: &str = "*";

/// Result of paginating one author.
#[derive(Debug)]
pub struct FetchOutcome {
    pub works: Vec<WorkRow>,
    /// True when pagination stopped on a failed page; `works` holds
    /// everything accumulated before the failure.
    pub partial: bool,
    /// Page requests issued (including the failed one, if any)
    pub requests: usize,
}

/// Fetch all works for one author, one page at a time.
///
/// Pages are requested strictly sequentially; each request holds one
/// permit from the shared pool. Pagination ends when the server reports
/// no next cursor, when a page comes back short (defense against
/// inconsistent cursor state), or when a request fails after retries —
/// the last case degrades to a partial result with a warning instead of
/// an error, so sibling fetches are unaffected.
pub fn fetch_author_works(
    api: &ApiClient,
    author_id: &str,
    permits: &PermitPool,
) -> FetchOutcome {
    let mut works = Vec::new();
    let mut requests = 0usize;
    let mut cursor = Some(START_CURSOR.to_string());

    while let Some(current) = cursor {
        let page = {
            let _permit = permits.acquire();
            requests += 1;
            api.works_page(author_id, &current)
        };

        match page {
            Ok(page) => {
                let page_len = page.results.len();
                works.extend(page.results);
                if page_len < api.per_page() {
                    break;
                }
                cursor = page.meta.next_cursor;
            }
            Err(e) => {
                log::warn!(
                    "{author_id}: page fetch failed ({e}); keeping {} accumulated works",
                    works.len()
                );
                return FetchOutcome {
                    works,
                    partial: true,
                    requests,
                };
            }
        }
    }

    FetchOutcome {
        works,
        partial: false,
        requests,
    }
}
