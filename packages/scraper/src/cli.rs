//! Command-line interface for the scraper.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{validate_date_range, ScraperConfig, DEFAULT_DOCUMENT_TYPE};
use crate::error::Result;
use crate::export::{export_csv, validate_output_dir};
use crate::pipeline::AcquisitionPipeline;
use crate::session::{HttpSearchSession, SearchSession};

/// Staatsblad scraper - Retrieve publications from the Belgian Official Gazette.
#[derive(Parser)]
#[command(name = "staatsblad-scraper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape a date range and export the dataset as CSV.
    Scrape {
        /// First publication date (YYYY-MM-DD)
        #[arg(long)]
        start_date: NaiveDate,

        /// Last publication date (YYYY-MM-DD)
        #[arg(long)]
        end_date: NaiveDate,

        /// Document type to query; repeat for several (default: Koninklijk besluit)
        #[arg(long = "doc-type")]
        doc_types: Vec<String>,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the document types the live search form offers.
    Types,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            start_date,
            end_date,
            doc_types,
            output,
        } => scrape_command(start_date, end_date, doc_types, output),
        Commands::Types => types_command(),
    }
}

/// Execute the scrape command.
fn scrape_command(
    start_date: NaiveDate,
    end_date: NaiveDate,
    mut doc_types: Vec<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    if doc_types.is_empty() {
        doc_types.push(DEFAULT_DOCUMENT_TYPE.to_string());
    }
    let output_dir = output.unwrap_or_else(|| PathBuf::from("."));

    // Validate inputs before any network I/O
    validate_date_range(start_date, end_date)?;
    validate_output_dir(&output_dir)?;

    println!(
        "{} {} from {} to {}",
        style("Scraping").bold(),
        style(doc_types.join(", ")).cyan(),
        style(start_date).green(),
        style(end_date).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Searching result pages...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut pipeline = AcquisitionPipeline::from_config(ScraperConfig::default())?;

    let sink_pb = pb.clone();
    let results = pipeline.run(start_date, end_date, &doc_types, move |completed, total| {
        if sink_pb.length().is_none() {
            #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
            sink_pb.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                    .expect("valid template"),
            );
            sink_pb.set_length(total as u64);
        }
        sink_pb.set_position(completed as u64);
        sink_pb.set_message(format!("Fetching detail {completed}/{total}"));
    });

    let results = match results {
        Ok(results) => results,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Exporting dataset...");
    let path = match export_csv(&results, start_date, end_date, &output_dir) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    let empty_bodies = results.iter().filter(|r| r.long_text.is_empty()).count();
    println!("  Entries: {}", style(results.len()).green());
    if empty_bodies > 0 {
        println!(
            "  Without body text: {}",
            style(empty_bodies).yellow().bold()
        );
    }
    println!();
    println!("{} {}", style("Saved to:").green().bold(), path.display());

    Ok(())
}

/// Execute the types command.
fn types_command() -> Result<()> {
    let mut session = HttpSearchSession::new(ScraperConfig::default())?;
    session.open_search()?;
    let types = session.list_document_types()?;

    println!(
        "{} {} document types",
        style("Found").bold(),
        style(types.len()).green()
    );
    for label in types {
        println!("  {label}");
    }

    Ok(())
}
