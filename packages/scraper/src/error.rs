//! Error types for the scraper.
//!
//! Only failures that invalidate a whole acquisition surface here: invalid
//! input, missing search-form structure, navigation problems. Per-document
//! detail failures are absorbed into an empty body and never reach this type.

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the scraper library.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// End date lies before start date.
    #[error("invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// An expected search-form element was not found.
    ///
    /// This indicates the site structure changed and aborts the run.
    #[error("search form element not found: {element} (site structure may have changed)")]
    MissingFormElement { element: String },

    /// The results page never appeared within the bounded wait.
    #[error("timed out after {waited_secs}s waiting for results page (marker '{marker}')")]
    NavigationTimeout { marker: String, waited_secs: u64 },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured or page-derived URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, ScraperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_range_display() {
        let err = ScraperError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert!(err.to_string().contains("2024-03-10"));
        assert!(err.to_string().contains("2024-03-01"));
    }

    #[test]
    fn test_missing_form_element_display() {
        let err = ScraperError::MissingFormElement {
            element: "select[name=dt]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "search form element not found: select[name=dt] (site structure may have changed)"
        );
    }

    #[test]
    fn test_navigation_timeout_display() {
        let err = ScraperError::NavigationTimeout {
            marker: "rech_res.pl".to_string(),
            waited_secs: 10,
        };
        assert!(err.to_string().contains("rech_res.pl"));
        assert!(err.to_string().contains("10s"));
    }
}
