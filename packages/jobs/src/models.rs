use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use staatsblad_scraper::config::DEFAULT_DOCUMENT_TYPE;
use staatsblad_scraper::EnrichedEntry;

/// Lifecycle of a scrape job.
///
/// Legal transitions: `Queued -> Scraping`, `Scraping -> Done`,
/// `Scraping -> Error`. Everything else is rejected by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Scraping,
    Done,
    Error,
}

impl JobStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Scraping => "scraping",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one scrape job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub document_types: Vec<String>,
}

impl ScrapeRequest {
    /// Create a request with the default document type.
    #[must_use]
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            document_types: vec![DEFAULT_DOCUMENT_TYPE.to_string()],
        }
    }

    #[must_use]
    pub fn with_document_types(mut self, document_types: Vec<String>) -> Self {
        self.document_types = document_types;
        self
    }
}

/// Full job record held by the store.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub id: Uuid,
    pub status: JobStatus,
    /// Percentage 0-100, derived from the pipeline's progress sink.
    pub progress: u8,
    pub progress_text: String,
    pub error: Option<String>,
    /// Number of entries in the result, once done.
    pub count: usize,
    pub result: Option<Vec<EnrichedEntry>>,
    pub export_file: Option<PathBuf>,
    pub filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    pub(crate) fn new(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: JobStatus::Queued,
            progress: 0,
            progress_text: String::new(),
            error: None,
            count: 0,
            result: None,
            export_file: None,
            filename: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Status view of a job: everything except the (large) result payload
/// and the server-local export path.
#[derive(Debug, Clone, Serialize)]
pub struct JobView {
    pub id: Uuid,
    pub status: JobStatus,
    pub progress: u8,
    pub progress_text: String,
    pub error: Option<String>,
    pub count: usize,
    pub filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&JobRecord> for JobView {
    fn from(record: &JobRecord) -> Self {
        Self {
            id: record.id,
            status: record.status,
            progress: record.progress,
            progress_text: record.progress_text.clone(),
            error: record.error.clone(),
            count: record.count,
            filename: record.filename.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// First rows of a finished job's dataset.
#[derive(Debug, Clone, Serialize)]
pub struct JobPreview {
    pub rows: Vec<EnrichedEntry>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_serialization() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Scraping).unwrap(),
            "\"scraping\""
        );
        assert_eq!(serde_json::to_string(&JobStatus::Done).unwrap(), "\"done\"");
    }

    #[test]
    fn test_scrape_request_default_type() {
        let request = ScrapeRequest::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        );
        assert_eq!(request.document_types, vec!["Koninklijk besluit"]);
    }

    #[test]
    fn test_scrape_request_with_document_types() {
        let request = ScrapeRequest::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        )
        .with_document_types(vec!["Wet".to_string()]);
        assert_eq!(request.document_types, vec!["Wet"]);
    }
}
