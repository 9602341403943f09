//! Error types for the ranking pipeline.
//!
//! Per-source problems are [`ScrapeError`]s and are always recovered at the
//! orchestrator boundary. Everything else here is fatal to a run.

use std::time::Duration;
use thiserror::Error;

/// Broad classification of a per-source failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The source could not be reached in time.
    Navigation,
    /// The page loaded but did not yield usable entries.
    Extraction,
}

/// A failure while extracting entries from a single source.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("navigation to {url} timed out after {timeout:?}")]
    NavigationTimeout { url: String, timeout: Duration },

    #[error("readiness condition `{readiness}` not met within {timeout:?}")]
    NotReady { readiness: String, timeout: Duration },

    #[error("no ranked entries found at {url}")]
    NoEntries { url: String },

    #[error("browser session error: {0}")]
    Session(String),
}

impl ScrapeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ScrapeError::Navigation { .. } | ScrapeError::NavigationTimeout { .. } => {
                FailureKind::Navigation
            }
            ScrapeError::NotReady { .. } | ScrapeError::NoEntries { .. } | ScrapeError::Session(_) => {
                FailureKind::Extraction
            }
        }
    }
}

/// The browser engine could not be started at all.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid browser configuration: {0}")]
    Config(String),

    #[error("failed to launch browser: {0}")]
    Launch(String),
}

/// A renderer could not turn the report model into bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to format report: {0}")]
    Format(#[from] std::fmt::Error),
}

/// The optional YAML configuration file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kinds() {
        let timeout = ScrapeError::NavigationTimeout {
            url: "https://example.com".to_string(),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(timeout.kind(), FailureKind::Navigation);

        let empty = ScrapeError::NoEntries {
            url: "https://example.com".to_string(),
        };
        assert_eq!(empty.kind(), FailureKind::Extraction);

        let not_ready = ScrapeError::NotReady {
            readiness: "table".to_string(),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(not_ready.kind(), FailureKind::Extraction);
    }

    #[test]
    fn test_error_messages_name_the_url() {
        let err = ScrapeError::Navigation {
            url: "https://pypl.github.io/PYPL.html".to_string(),
            reason: "dns".to_string(),
        };
        assert!(err.to_string().contains("pypl.github.io"));
        assert!(err.to_string().contains("dns"));
    }
}
