//! Works-search API client

use serde::Deserialize;

use scholia_core::http::{ApiError, http_get_with_retry};

use crate::config::Config;
use crate::work::WorkRow;

/// One page of works-search results.
#[derive(Debug, Deserialize, Default)]
pub struct WorksPage {
    #[serde(default)]
    pub results: Vec<WorkRow>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Deserialize, Default)]
pub struct PageMeta {
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Client for the cursor-paginated works endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    mailto: Option<String>,
    per_page: usize,
    max_retries: u32,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            mailto: config.mailto.clone(),
            per_page: config.per_page,
            max_retries: config.max_retries,
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Fetch one page of an author's works at the given cursor.
    pub fn works_page(&self, author_id: &str, cursor: &str) -> Result<WorksPage, ApiError> {
        let url = self.works_url(author_id, cursor);
        let body = http_get_with_retry(&url, self.max_retries)?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn works_url(&self, author_id: &str, cursor: &str) -> String {
        let mut url = format!(
            "{}/works?filter=author.id:{}&per-page={}&cursor={}",
            self.base_url, author_id, self.per_page, cursor
        );
        if let Some(mailto) = &self.mailto {
            url.push_str("&mailto=");
            url.push_str(mailto);
        }
        url
    }
}
