//! In-memory job store with a validated state-transition set.
//!
//! Jobs move `queued -> scraping -> done|error`; any other transition is an
//! error. The store is the only shared state between a submitting caller and
//! the background task running the job — the acquisition pipeline itself
//! never sees it, communicating only through its return value and the
//! progress sink.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use staatsblad_scraper::EnrichedEntry;

use crate::error::{JobsError, Result};
use crate::models::{JobPreview, JobRecord, JobStatus, JobView};

/// Shared handle to the job map. Cheap to clone.
#[derive(Clone, Default)]
pub struct JobStore {
    inner: Arc<Mutex<HashMap<Uuid, JobRecord>>>,
}

impl JobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, JobRecord>> {
        // A panicked holder leaves the map intact; keep serving it
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a new queued job and return its identifier.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().insert(id, JobRecord::new(id));
        tracing::info!(job_id = %id, "job created");
        id
    }

    /// Full record of a job, including the result payload.
    pub fn get(&self, id: Uuid) -> Result<JobRecord> {
        self.lock()
            .get(&id)
            .cloned()
            .ok_or(JobsError::JobNotFound(id))
    }

    /// Status view of a job, without the result payload.
    pub fn view(&self, id: Uuid) -> Result<JobView> {
        self.lock()
            .get(&id)
            .map(JobView::from)
            .ok_or(JobsError::JobNotFound(id))
    }

    /// First `limit` rows of a job's dataset plus the total row count.
    pub fn preview(&self, id: Uuid, limit: usize) -> Result<JobPreview> {
        let guard = self.lock();
        let record = guard.get(&id).ok_or(JobsError::JobNotFound(id))?;
        let rows: &[EnrichedEntry] = record.result.as_deref().unwrap_or_default();
        Ok(JobPreview {
            rows: rows.iter().take(limit).cloned().collect(),
            total: rows.len(),
        })
    }

    /// `Queued -> Scraping`.
    pub fn start(&self, id: Uuid) -> Result<()> {
        self.transition(id, JobStatus::Scraping, |record| {
            record.progress_text = "Opening search session...".to_string();
        })
    }

    /// Record fractional progress on a running job.
    pub fn set_progress(&self, id: Uuid, completed: usize, total: usize) -> Result<()> {
        let mut guard = self.lock();
        let record = guard.get_mut(&id).ok_or(JobsError::JobNotFound(id))?;
        if record.status != JobStatus::Scraping {
            return Err(JobsError::InvalidStateTransition {
                from: record.status,
                to: JobStatus::Scraping,
            });
        }
        record.progress = if total == 0 {
            0
        } else {
            (completed * 100 / total).min(100) as u8
        };
        record.progress_text = format!("Fetching detail {completed}/{total}");
        record.updated_at = chrono::Utc::now();
        Ok(())
    }

    /// `Scraping -> Done`, attaching the dataset and export location.
    pub fn complete(
        &self,
        id: Uuid,
        result: Vec<EnrichedEntry>,
        export_file: PathBuf,
        filename: String,
    ) -> Result<()> {
        self.transition(id, JobStatus::Done, |record| {
            record.progress = 100;
            record.progress_text = String::new();
            record.count = result.len();
            record.result = Some(result);
            record.export_file = Some(export_file);
            record.filename = Some(filename);
        })
    }

    /// `Scraping -> Error`, recording the failure message.
    pub fn fail(&self, id: Uuid, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        self.transition(id, JobStatus::Error, move |record| {
            record.error = Some(message);
        })
    }

    /// Apply a validated status transition plus an update to the record.
    fn transition<U>(&self, id: Uuid, to: JobStatus, update: U) -> Result<()>
    where
        U: FnOnce(&mut JobRecord),
    {
        let mut guard = self.lock();
        let record = guard.get_mut(&id).ok_or(JobsError::JobNotFound(id))?;

        let legal = matches!(
            (record.status, to),
            (JobStatus::Queued, JobStatus::Scraping)
                | (JobStatus::Scraping, JobStatus::Done)
                | (JobStatus::Scraping, JobStatus::Error)
        );
        if !legal {
            return Err(JobsError::InvalidStateTransition {
                from: record.status,
                to,
            });
        }

        let from = record.status;
        record.status = to;
        update(record);
        record.updated_at = chrono::Utc::now();
        tracing::info!(job_id = %id, %from, %to, "job transitioned");
        Ok(())
    }
}
