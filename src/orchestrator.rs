//! Concurrent extraction across all sources.
//!
//! Every source gets its own browser session and runs at the same time as
//! the others. A source that fails, or hangs until its timeout, only turns
//! its own slot into [`SourceResult::Failed`]; siblings are never cancelled.
//! Results come back in descriptor order regardless of completion order.

use crate::browser::BrowserEngine;
use crate::error::ScrapeError;
use crate::models::{RankedEntry, SourceId, SourceResult};
use crate::scrapers::{self, SourceDescriptor};
use futures::stream::{self, StreamExt};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info, instrument, warn};

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { source: SourceId },
    Completed { source: SourceId, entries: usize },
    Failed { source: SourceId, error: String },
}

/// Scrape every source concurrently and wait for all of them.
///
/// `limit` bounds each navigation and readiness wait of each source.
/// Progress events go to `progress` when given; the sender is dropped when
/// the run ends, which closes the channel.
#[instrument(level = "info", skip_all, fields(sources = sources.len(), ?limit))]
pub async fn run(
    engine: &dyn BrowserEngine,
    sources: &[SourceDescriptor],
    limit: Duration,
    progress: Option<UnboundedSender<ProgressEvent>>,
) -> Vec<SourceResult> {
    let started = Instant::now();
    let progress = progress.as_ref();
    info!("Starting concurrent extraction");

    let results: Vec<SourceResult> = stream::iter(sources)
        .map(|source| run_source(engine, source, limit, progress))
        .buffered(sources.len().max(1))
        .collect()
        .await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let failed = results.len() - succeeded;
    let open = engine.active_sessions();
    if open > 0 {
        warn!(sessions = open, "Sessions still open after extraction");
    }
    info!(
        total = results.len(),
        succeeded,
        failed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Completed concurrent extraction"
    );
    results
}

async fn run_source(
    engine: &dyn BrowserEngine,
    source: &SourceDescriptor,
    limit: Duration,
    progress: Option<&UnboundedSender<ProgressEvent>>,
) -> SourceResult {
    emit(progress, ProgressEvent::Started { source: source.id });

    match scrape_in_session(engine, source, limit).await {
        Ok(entries) => {
            info!(source = %source.id, count = entries.len(), "Source succeeded");
            emit(
                progress,
                ProgressEvent::Completed {
                    source: source.id,
                    entries: entries.len(),
                },
            );
            SourceResult::Ok {
                source: source.id,
                entries,
            }
        }
        Err(cause) => {
            error!(source = %source.id, kind = ?cause.kind(), error = %cause, "Source failed; continuing without it");
            emit(
                progress,
                ProgressEvent::Failed {
                    source: source.id,
                    error: cause.to_string(),
                },
            );
            SourceResult::Failed {
                source: source.id,
                cause,
            }
        }
    }
}

/// Open a session, extract, and close the session on every path.
async fn scrape_in_session(
    engine: &dyn BrowserEngine,
    source: &SourceDescriptor,
    limit: Duration,
) -> Result<Vec<RankedEntry>, ScrapeError> {
    let mut session = engine.open().await?;
    let outcome = scrapers::extract(session.as_mut(), source, limit).await;
    if let Err(e) = session.close().await {
        warn!(source = %source.id, error = %e, "Failed to close session");
    }
    outcome
}

fn emit(progress: Option<&UnboundedSender<ProgressEvent>>, event: ProgressEvent) {
    if let Some(tx) = progress {
        if tx.send(event).is_err() {
            debug!("Progress receiver dropped");
        }
    }
}

/// Log progress events as they arrive, plus a heartbeat every `heartbeat`
/// while the run is still going. Returns once the sender side is dropped.
pub async fn log_progress(mut rx: UnboundedReceiver<ProgressEvent>, heartbeat: Duration) {
    let mut ticker = interval(heartbeat);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick fires immediately.
    ticker.tick().await;

    let mut finished = 0usize;
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(ProgressEvent::Started { source }) => debug!(%source, "Scraping source"),
                Some(ProgressEvent::Completed { source, entries }) => {
                    finished += 1;
                    info!(%source, entries, finished, "Source finished");
                }
                Some(ProgressEvent::Failed { source, error }) => {
                    finished += 1;
                    warn!(%source, %error, finished, "Source finished with failure");
                }
                None => break,
            },
            _ = ticker.tick() => info!(finished, "Scraping still in progress"),
        }
    }
}
