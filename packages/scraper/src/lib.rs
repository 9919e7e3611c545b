//! Staatsblad Scraper - Retrieve publications from the Belgian Official Gazette.
//!
//! This crate turns a date-range query against the gazette's search form
//! into a fully enriched dataset: one record per listed document, with
//! metadata from the result list and the document body fetched from its
//! detail page. The dataset feeds a downstream screening classifier.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use staatsblad_scraper::{AcquisitionPipeline, ScraperConfig};
//!
//! # fn main() -> staatsblad_scraper::Result<()> {
//! let mut pipeline = AcquisitionPipeline::from_config(ScraperConfig::default())?;
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
//! let types = vec!["Koninklijk besluit".to_string()];
//!
//! let dataset = pipeline.run(start, end, &types, |done, total| {
//!     eprintln!("{done}/{total}");
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Site constants, configuration, input validation
//! - [`types`]: Core data types (queries, result entries, enriched entries)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client construction
//! - [`text`]: Cleanup of DOM-extracted fragments
//! - [`parse`]: HTML extraction for form, result list and detail pages
//! - [`session`]: Search session capability trait and HTTP implementation
//! - [`detail`]: Fail-soft detail fetcher
//! - [`pipeline`]: The acquisition orchestrator
//! - [`export`]: CSV export of the dataset
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod detail;
pub mod error;
pub mod export;
pub mod http;
pub mod parse;
pub mod pipeline;
pub mod session;
pub mod text;
pub mod types;

// Re-export the main entry points
pub use pipeline::AcquisitionPipeline;

// Re-export commonly used items
pub use config::{validate_date_range, ScraperConfig};
pub use detail::{DetailFetch, DetailFetcher};
pub use error::{Result, ScraperError};
pub use export::export_csv;
pub use session::{HttpSearchSession, SearchSession};
pub use types::{DocumentTypeQuery, EnrichedEntry, ResultEntry};
