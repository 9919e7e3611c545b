//! Configuration constants and validation for the scraper.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Result, ScraperError};

/// Search form of the Belgian Official Gazette (Belgisch Staatsblad).
pub const SEARCH_PAGE_URL: &str = "https://www.ejustice.just.fgov.be/cgi/rech.pl";

/// Base URL that page-relative detail links are appended to.
pub const DETAIL_BASE_URL: &str = "https://www.ejustice.just.fgov.be";

/// Substring the destination URL must contain once the search results load.
pub const RESULTS_MARKER: &str = "rech_res.pl";

/// Bounded wait for the results page, in seconds.
pub const NAVIGATION_TIMEOUT_SECS: u64 = 10;

/// Bounded wait for a single detail-page fetch, in seconds.
pub const DETAIL_TIMEOUT_SECS: u64 = 15;

/// Document type queried when the caller does not specify any.
pub const DEFAULT_DOCUMENT_TYPE: &str = "Koninklijk besluit";

/// Date format used by the search form's date inputs.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Scraper configuration.
///
/// Defaults target the live gazette; tests point `search_url` and
/// `detail_base_url` at a local mock server instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// URL of the search form page.
    pub search_url: String,

    /// Base URL for detail links (result hrefs are page-relative).
    pub detail_base_url: String,

    /// Document-type labels this deployment recognizes.
    pub document_types: Vec<String>,

    /// Substring that marks the results page URL.
    pub results_marker: String,

    /// Bounded wait for search navigation, in seconds.
    pub navigation_timeout_secs: u64,

    /// Bounded wait per detail fetch, in seconds.
    pub detail_timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            search_url: SEARCH_PAGE_URL.to_string(),
            detail_base_url: DETAIL_BASE_URL.to_string(),
            document_types: vec![DEFAULT_DOCUMENT_TYPE.to_string()],
            results_marker: RESULTS_MARKER.to_string(),
            navigation_timeout_secs: NAVIGATION_TIMEOUT_SECS,
            detail_timeout_secs: DETAIL_TIMEOUT_SECS,
        }
    }
}

impl ScraperConfig {
    /// Create a configuration for a specific site instance.
    pub fn new(search_url: impl Into<String>, detail_base_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            detail_base_url: detail_base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_document_types(mut self, document_types: Vec<String>) -> Self {
        self.document_types = document_types;
        self
    }

    pub fn with_results_marker(mut self, marker: impl Into<String>) -> Self {
        self.results_marker = marker.into();
        self
    }

    pub fn with_navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.navigation_timeout_secs = secs;
        self
    }

    pub fn with_detail_timeout_secs(mut self, secs: u64) -> Self {
        self.detail_timeout_secs = secs;
        self
    }
}

/// Validate that a date range is ordered.
///
/// Called before any I/O begins; an inverted range aborts the run.
///
/// # Arguments
/// * `start_date` - First publication date included in the query
/// * `end_date` - Last publication date included in the query
///
/// # Returns
/// * `Ok(())` if `end_date >= start_date`
/// * `Err(ScraperError::InvalidDateRange)` otherwise
pub fn validate_date_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
    if end_date < start_date {
        return Err(ScraperError::InvalidDateRange {
            start: start_date,
            end: end_date,
        });
    }
    Ok(())
}

/// Build an absolute detail URL from the configured base and a page-relative href.
pub fn detail_url(base: &str, href: &str) -> String {
    format!("{base}{href}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_date_range_ordered() {
        assert!(validate_date_range(date(2024, 3, 1), date(2024, 3, 10)).is_ok());
    }

    #[test]
    fn test_validate_date_range_same_day() {
        assert!(validate_date_range(date(2024, 3, 1), date(2024, 3, 1)).is_ok());
    }

    #[test]
    fn test_validate_date_range_inverted() {
        let err = validate_date_range(date(2024, 3, 10), date(2024, 3, 1));
        assert!(matches!(
            err,
            Err(ScraperError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_detail_url() {
        assert_eq!(
            detail_url(
                "https://www.ejustice.just.fgov.be",
                "/cgi/article_body.pl?numac=2024001234"
            ),
            "https://www.ejustice.just.fgov.be/cgi/article_body.pl?numac=2024001234"
        );
    }

    #[test]
    fn test_default_config() {
        let config = ScraperConfig::default();
        assert_eq!(config.search_url, SEARCH_PAGE_URL);
        assert_eq!(config.results_marker, "rech_res.pl");
        assert_eq!(config.document_types, vec!["Koninklijk besluit"]);
    }

    #[test]
    fn test_config_builders() {
        let config = ScraperConfig::new("http://localhost:8080/rech.pl", "http://localhost:8080")
            .with_document_types(vec!["Wet".to_string(), "Decreet".to_string()])
            .with_navigation_timeout_secs(2)
            .with_detail_timeout_secs(1);
        assert_eq!(config.search_url, "http://localhost:8080/rech.pl");
        assert_eq!(config.document_types.len(), 2);
        assert_eq!(config.navigation_timeout_secs, 2);
        assert_eq!(config.detail_timeout_secs, 1);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: ScraperConfig =
            serde_json::from_str(r#"{"search_url": "http://example.org/rech.pl"}"#).unwrap();
        assert_eq!(config.search_url, "http://example.org/rech.pl");
        assert_eq!(config.detail_base_url, DETAIL_BASE_URL);
    }
}
