use crate::error::{CrawlError, Result};
use reqwest::Client;
use tracing::debug;

/// HTTP page fetcher shared by all crawl workers.
///
/// Owns the timeout policy: every request is bounded by a fixed budget so a
/// stalled server can never hang a worker indefinitely.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Sitemapper/0.1 (https://github.com/trapdoorsec/sitemapper)")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// GET a page and return its raw bytes. Non-2xx responses are failures;
    /// the caller decides whether that is fatal (for this crawler it never is).
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(5)
    }
}
