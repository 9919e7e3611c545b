//! HTTP client construction for the scraper.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::Result;

/// User agent string identifying this scraper.
const USER_AGENT: &str = concat!("staatsblad-scraper/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Arguments
/// * `timeout` - Per-request bound; callers pass the navigation or detail
///   timeout from configuration
///
/// # Returns
/// A `reqwest::blocking::Client` with the given timeout and user agent.
pub fn create_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client(Duration::from_secs(5));
        assert!(client.is_ok());
    }
}
