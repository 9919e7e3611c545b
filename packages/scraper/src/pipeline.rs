//! Acquisition pipeline: turns a date-range query into an enriched dataset.
//!
//! One invocation walks every requested document type through the search
//! session, accumulates the raw entries, then enriches each entry with its
//! document body while reporting fractional progress. Search failures abort
//! the invocation; enrichment failures degrade to an empty body. There are
//! no retries on either side.

use chrono::NaiveDate;

use crate::config::{validate_date_range, ScraperConfig};
use crate::detail::{DetailFetch, DetailFetcher};
use crate::error::Result;
use crate::session::{HttpSearchSession, SearchSession};
use crate::types::{DocumentTypeQuery, EnrichedEntry};

/// Orchestrator over a search session and a detail fetcher.
pub struct AcquisitionPipeline<S, F> {
    session: S,
    fetcher: F,
}

impl AcquisitionPipeline<HttpSearchSession, DetailFetcher> {
    /// Build the production pipeline: HTTP session plus HTTP detail fetcher.
    ///
    /// The session and both HTTP clients live exactly as long as the
    /// pipeline value; nothing is shared across runs.
    pub fn from_config(config: ScraperConfig) -> Result<Self> {
        let fetcher = DetailFetcher::new(&config)?;
        let session = HttpSearchSession::new(config)?;
        Ok(Self::new(session, fetcher))
    }
}

impl<S: SearchSession, F: DetailFetch> AcquisitionPipeline<S, F> {
    pub fn new(session: S, fetcher: F) -> Self {
        Self { session, fetcher }
    }

    /// Run one acquisition.
    ///
    /// Document types are processed in caller order; duplicates are not
    /// filtered. A type the live form does not offer yields nothing and is
    /// skipped silently, indistinguishable from a type with zero results.
    ///
    /// `progress_sink` is called once per enriched entry as
    /// `(completed, total)`, only after searching has finished for all
    /// types. With zero accumulated entries it is never called.
    ///
    /// # Arguments
    /// * `start_date` - First publication date included
    /// * `end_date` - Last publication date included
    /// * `document_types` - Document-type labels, in processing order
    /// * `progress_sink` - Cheap callback for fractional progress
    ///
    /// # Returns
    /// One `EnrichedEntry` per accumulated result, in accumulation order.
    pub fn run<P>(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        document_types: &[String],
        mut progress_sink: P,
    ) -> Result<Vec<EnrichedEntry>>
    where
        P: FnMut(usize, usize),
    {
        // Reject malformed input before any navigation or HTTP call
        validate_date_range(start_date, end_date)?;

        let mut accumulated = Vec::new();
        for document_type in document_types {
            let entries = self.search_type(document_type, start_date, end_date)?;
            tracing::info!(
                doc_type = %document_type,
                entries = entries.len(),
                "document type searched"
            );
            accumulated.extend(entries);
        }

        let total = accumulated.len();
        if total == 0 {
            tracing::info!("no entries accumulated, nothing to enrich");
            return Ok(Vec::new());
        }

        tracing::info!(total, "fetching document bodies");
        let mut enriched = Vec::with_capacity(total);
        for (i, entry) in accumulated.into_iter().enumerate() {
            let long_text = self.fetcher.fetch_body(&entry.url);
            enriched.push(EnrichedEntry::from_entry(entry, long_text));
            progress_sink(i + 1, total);
        }

        Ok(enriched)
    }

    /// Drain the search session for one document type.
    ///
    /// Returns an empty vector when the live form does not offer the type.
    fn search_type(
        &mut self,
        document_type: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<crate::types::ResultEntry>> {
        self.session.open_search()?;
        let known = self.session.list_document_types()?;
        if !known.iter().any(|label| label == document_type) {
            tracing::warn!(
                doc_type = %document_type,
                "document type not offered by the search form, skipping"
            );
            return Ok(Vec::new());
        }

        // Reload: selection state is not assumed preserved across the check
        self.session.open_search()?;
        let query = DocumentTypeQuery::new(document_type, start_date, end_date);
        let mut entries = self.session.submit_query(&query)?;
        while let Some(page) = self.session.next_page()? {
            entries.extend(page);
        }
        Ok(entries)
    }
}
