//! Core data types for the acquisition pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One document-type query against the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTypeQuery {
    /// Document-type label as the search form spells it.
    pub document_type: String,

    /// First publication date included.
    pub start_date: NaiveDate,

    /// Last publication date included.
    pub end_date: NaiveDate,
}

impl DocumentTypeQuery {
    #[must_use]
    pub fn new(
        document_type: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            document_type: document_type.into(),
            start_date,
            end_date,
        }
    }
}

/// One raw search result, as listed on a results page.
///
/// `pub_date` stays in the site-native format and is never reparsed.
/// `url` is absolute, built from the configured detail base URL plus the
/// page-relative href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Reference number shown on the result item's button.
    pub ref_number: String,

    /// Publication date as printed on the results page.
    pub pub_date: String,

    /// Short description from the result item's link text.
    pub short_text: String,

    /// Absolute URL of the detail page.
    pub url: String,
}

impl ResultEntry {
    #[must_use]
    pub fn new(
        ref_number: impl Into<String>,
        pub_date: impl Into<String>,
        short_text: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            ref_number: ref_number.into(),
            pub_date: pub_date.into(),
            short_text: short_text.into(),
            url: url.into(),
        }
    }
}

/// A result entry with its fetched document body attached.
///
/// `long_text` is the empty string when the detail fetch or parse failed;
/// it is never absent. Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedEntry {
    pub ref_number: String,
    pub pub_date: String,
    pub short_text: String,
    pub url: String,
    pub long_text: String,
}

impl EnrichedEntry {
    /// Attach a fetched body to a result entry.
    #[must_use]
    pub fn from_entry(entry: ResultEntry, long_text: impl Into<String>) -> Self {
        Self {
            ref_number: entry.ref_number,
            pub_date: entry.pub_date,
            short_text: entry.short_text,
            url: entry.url,
            long_text: long_text.into(),
        }
    }
}
