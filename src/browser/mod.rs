//! Browser session abstraction.
//!
//! The scrapers never talk to a browser directly. They lease a [`Session`]
//! (one page/tab) from a [`BrowserEngine`], drive it through navigation and a
//! readiness wait, read the content they need, and close it.
//!
//! Sessions impose no timeouts of their own; callers bound each step.

pub mod chromium;
#[cfg(test)]
pub mod fake;

use crate::error::ScrapeError;
use async_trait::async_trait;
use std::fmt;

/// Condition that must hold before a page's content is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// An element matching this CSS selector exists.
    Selector(&'static str),
    /// The document body exists.
    Body,
}

impl Readiness {
    /// CSS selector that satisfies this condition.
    pub fn selector(self) -> &'static str {
        match self {
            Readiness::Selector(s) => s,
            Readiness::Body => "body",
        }
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// A browser engine that hands out one session per extraction.
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// Open a fresh page.
    async fn open(&self) -> Result<Box<dyn Session>, ScrapeError>;
    /// Number of sessions currently open.
    fn active_sessions(&self) -> usize;
}

/// A single browser page owned by one extraction task.
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigate to `url` and wait for the load to finish.
    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError>;
    /// Wait until `readiness` holds. Never gives up on its own.
    async fn wait_ready(&mut self, readiness: Readiness) -> Result<(), ScrapeError>;
    /// Full serialized DOM of the page.
    async fn html(&self) -> Result<String, ScrapeError>;
    /// Rendered text of the document body.
    async fn body_text(&self) -> Result<String, ScrapeError>;
    /// Release the page.
    async fn close(self: Box<Self>) -> Result<(), ScrapeError>;
}
