//! # Language Rankings
//!
//! Scrapes ranked lists of programming languages from six independent web
//! sources, lines them up into three side-by-side comparison tables, and
//! writes the result as a report.
//!
//! ## Usage
//!
//! ```sh
//! language_rankings -o ./reports -f markdown
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Extraction**: Scrape all sources concurrently in headless Chromium
//!    (one tab per source, per-source timeout, failures isolated)
//! 2. **Merging**: Pair sources per comparison and align them by position
//! 3. **Assembly**: Build the renderer-agnostic report model
//! 4. **Output**: Render the model and write it to disk
//!
//! Failed sources show up as `N/A` cells. Only a browser that will not start,
//! a renderer error, or an unwritable output aborts the run.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod browser;
mod cli;
mod config;
mod error;
mod merge;
mod models;
mod orchestrator;
mod outputs;
mod report;
mod scrapers;
mod utils;

use browser::chromium::ChromiumEngine;
use cli::{Cli, Format};
use config::{FileConfig, Settings, load_config};
use outputs::json::JsonRenderer;
use outputs::markdown::MarkdownRenderer;
use outputs::{ReportRenderer, report_path, write_report};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("language_rankings starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let file_config = match &args.config {
        Some(path) => load_config(path).await.inspect_err(|e| {
            error!(error = %e, "Could not load configuration");
        })?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, file_config);
    info!(
        timeout_secs = settings.timeout.as_secs(),
        heartbeat_secs = settings.heartbeat.as_secs(),
        "Resolved settings"
    );

    // Early check: fail before scraping if the report cannot be written
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    // ---- Scrape all sources ----
    let engine = ChromiumEngine::launch(settings.chrome_path.clone(), settings.timeout)
        .await
        .inspect_err(|e| error!(error = %e, "Browser engine failed to start"))?;

    let (progress_tx, progress_rx) = mpsc::unbounded_channel();
    let progress_logger = tokio::spawn(orchestrator::log_progress(progress_rx, settings.heartbeat));

    let results = orchestrator::run(
        &engine,
        &scrapers::sources::ALL,
        settings.timeout,
        Some(progress_tx),
    )
    .await;

    if let Err(e) = progress_logger.await {
        debug!(error = %e, "Progress logger ended abnormally");
    }
    engine.shutdown().await;

    // ---- Merge and assemble ----
    let tables = merge::tabulate(&results);
    info!(
        popularity = tables.popularity.len(),
        compensation = tables.compensation.len(),
        learning_difficulty = tables.learning_difficulty.len(),
        "Built comparison tables"
    );
    let report = report::assemble(&settings.header, tables);

    // ---- Render and write ----
    let renderer: Box<dyn ReportRenderer> = match args.format {
        Format::Json => Box::new(JsonRenderer),
        Format::Markdown => Box::new(MarkdownRenderer::new(
            args.logo_path.clone(),
            Local::now().date_naive(),
        )),
    };
    let bytes = renderer
        .render(&report)
        .inspect_err(|e| error!(error = %e, "Rendering failed; no report written"))?;

    let path = report_path(&args.output_dir, renderer.as_ref());
    write_report(&path, &bytes)
        .await
        .inspect_err(|e| error!(path = %path.display(), error = %e, "Failed writing report"))?;

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        failed_sources = failed,
        path = %path.display(),
        "Execution complete"
    );

    Ok(())
}
