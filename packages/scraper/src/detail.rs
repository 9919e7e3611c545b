//! Detail fetcher: stateless retrieval of one document's body text.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::ScraperConfig;
use crate::error::Result;
use crate::http::create_client;
use crate::parse;

/// Anything that can turn a detail URL into a body text.
///
/// The contract is fail-soft: implementations always return a string, with
/// `""` standing in for any fetch or parse failure. One unreachable document
/// must not abort a batch of hundreds.
pub trait DetailFetch {
    fn fetch_body(&self, url: &str) -> String;
}

/// HTTP implementation of [`DetailFetch`].
pub struct DetailFetcher {
    client: Client,
}

impl DetailFetcher {
    /// Create a fetcher with the configured per-request timeout.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = create_client(Duration::from_secs(config.detail_timeout_secs))?;
        Ok(Self { client })
    }

    /// Fetch and parse one detail page; errors propagate to the caller.
    fn try_fetch(&self, url: &str) -> Result<Option<String>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let html = response.text()?;
        Ok(parse::article_body(&html))
    }
}

impl DetailFetch for DetailFetcher {
    fn fetch_body(&self, url: &str) -> String {
        match self.try_fetch(url) {
            Ok(Some(body)) => body,
            Ok(None) => {
                tracing::debug!(url, "detail page has no article body");
                String::new()
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "detail fetch failed, recording empty body");
                String::new()
            }
        }
    }
}
