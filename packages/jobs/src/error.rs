use thiserror::Error;
use uuid::Uuid;

use crate::models::JobStatus;

#[derive(Debug, Error)]
pub enum JobsError {
    #[error("job not found: {0}")]
    JobNotFound(Uuid),

    #[error("invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: JobStatus, to: JobStatus },

    #[error(transparent)]
    Scraper(#[from] staatsblad_scraper::ScraperError),
}

pub type Result<T> = std::result::Result<T, JobsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_display() {
        let err = JobsError::InvalidStateTransition {
            from: JobStatus::Done,
            to: JobStatus::Scraping,
        };
        assert_eq!(err.to_string(), "invalid state transition: done -> scraping");
    }
}
