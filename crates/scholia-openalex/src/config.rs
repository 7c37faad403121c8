//! Fetch engine configuration

/// Runtime configuration for the works fetch engine.
///
/// `concurrency` and `rate_limit` are independent bounds: the first caps
/// parallel author fetches, the second caps in-flight HTTP requests
/// across all of them.
#[derive(Debug, Clone)]
pub struct Config {
    /// API base URL
    pub base_url: String,
    /// Email for the polite pool (higher rate limits when set)
    pub mailto: Option<String>,
    /// Records per page (API maximum is 200)
    pub per_page: usize,
    /// Parallel author fetches
    pub concurrency: usize,
    /// In-flight request permits shared across all fetches
    pub rate_limit: usize,
    /// Retry attempts per page request for transient failures
    pub max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://api.openalex.org".to_string(),
            mailto: None,
            per_page: 200,
            concurrency: 5,
            rate_limit: 10,
            max_retries: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://api.openalex.org");
        assert!(config.mailto.is_none());
        assert_eq!(config.per_page, 200);
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.rate_limit, 10);
        assert_eq!(config.max_retries, 3);
    }
}
