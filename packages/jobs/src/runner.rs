//! Executes one scrape job against the store.
//!
//! The runner owns the job lifecycle: it transitions the job to scraping,
//! forwards the pipeline's progress sink into the store, exports the dataset
//! and records the outcome. Every failure path ends in the job's `error`
//! state with the failure's message; nothing propagates to the caller.

use std::path::Path;

use uuid::Uuid;

use staatsblad_scraper::detail::DetailFetch;
use staatsblad_scraper::export::export_csv;
use staatsblad_scraper::pipeline::AcquisitionPipeline;
use staatsblad_scraper::session::SearchSession;
use staatsblad_scraper::ScraperConfig;

use crate::error::Result;
use crate::models::ScrapeRequest;
use crate::store::JobStore;

/// Run one scrape job to completion on the given pipeline.
///
/// Generic over the session and fetcher so tests can drive the full job
/// lifecycle without a network.
pub fn run_scrape_job<S, F>(
    store: &JobStore,
    job_id: Uuid,
    pipeline: &mut AcquisitionPipeline<S, F>,
    request: &ScrapeRequest,
    output_dir: &Path,
) where
    S: SearchSession,
    F: DetailFetch,
{
    if let Err(e) = store.start(job_id) {
        tracing::error!(job_id = %job_id, error = %e, "could not start job");
        return;
    }

    match execute(store, job_id, pipeline, request, output_dir) {
        Ok(count) => {
            tracing::info!(job_id = %job_id, count, "scrape job done");
        }
        Err(e) => {
            tracing::warn!(job_id = %job_id, error = %e, "scrape job failed");
            if let Err(store_err) = store.fail(job_id, e.to_string()) {
                tracing::error!(job_id = %job_id, error = %store_err, "could not record job failure");
            }
        }
    }
}

/// Build the production pipeline and run one scrape job on it.
///
/// This is what a service spawns on a background thread per submitted job.
pub fn run_scrape_job_http(
    store: &JobStore,
    job_id: Uuid,
    config: ScraperConfig,
    request: &ScrapeRequest,
    output_dir: &Path,
) {
    match AcquisitionPipeline::from_config(config) {
        Ok(mut pipeline) => run_scrape_job(store, job_id, &mut pipeline, request, output_dir),
        Err(e) => {
            tracing::error!(job_id = %job_id, error = %e, "could not build pipeline");
            // Surface the construction failure on the job like any other error
            if store.start(job_id).is_ok() {
                if let Err(store_err) = store.fail(job_id, e.to_string()) {
                    tracing::error!(job_id = %job_id, error = %store_err, "could not record job failure");
                }
            }
        }
    }
}

/// The fallible part of a job run: acquisition, export, completion.
fn execute<S, F>(
    store: &JobStore,
    job_id: Uuid,
    pipeline: &mut AcquisitionPipeline<S, F>,
    request: &ScrapeRequest,
    output_dir: &Path,
) -> Result<usize>
where
    S: SearchSession,
    F: DetailFetch,
{
    let sink_store = store.clone();
    let results = pipeline.run(
        request.start_date,
        request.end_date,
        &request.document_types,
        move |completed, total| {
            if let Err(e) = sink_store.set_progress(job_id, completed, total) {
                tracing::error!(job_id = %job_id, error = %e, "could not record progress");
            }
        },
    )?;

    let path = export_csv(&results, request.start_date, request.end_date, output_dir)?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let count = results.len();
    store.complete(job_id, results, path, filename)?;
    Ok(count)
}
