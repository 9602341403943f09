//! In-memory browser engine for tests.
//!
//! Pages are scripted per URL: how long navigation takes, whether it fails,
//! whether the readiness condition ever holds, and what content is served.

use super::{BrowserEngine, Readiness, Session};
use crate::error::ScrapeError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone, Default)]
pub struct FakePage {
    pub delay: Duration,
    pub fail_navigation: bool,
    pub hang_navigation: bool,
    pub never_ready: bool,
    pub ready_error: bool,
    pub html: String,
    pub text: String,
}

impl FakePage {
    pub fn with_html(html: &str) -> Self {
        Self {
            html: html.to_string(),
            ..Self::default()
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
pub struct FakeEngine {
    pages: HashMap<String, FakePage>,
    opened: Arc<AtomicUsize>,
    active: Arc<AtomicUsize>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserEngine for FakeEngine {
    async fn open(&self) -> Result<Box<dyn Session>, ScrapeError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.active.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            pages: self.pages.clone(),
            current: None,
            active: Arc::clone(&self.active),
        }))
    }

    fn active_sessions(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

struct FakeSession {
    pages: HashMap<String, FakePage>,
    current: Option<FakePage>,
    active: Arc<AtomicUsize>,
}

#[async_trait]
impl Session for FakeSession {
    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError> {
        let page = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Navigation {
                url: url.to_string(),
                reason: "unknown host".to_string(),
            })?;
        if page.hang_navigation {
            std::future::pending::<()>().await;
        }
        sleep(page.delay).await;
        if page.fail_navigation {
            return Err(ScrapeError::Navigation {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        self.current = Some(page);
        Ok(())
    }

    async fn wait_ready(&mut self, _readiness: Readiness) -> Result<(), ScrapeError> {
        match &self.current {
            Some(page) if page.ready_error => {
                Err(ScrapeError::Session("target crashed".to_string()))
            }
            Some(page) if !page.never_ready => Ok(()),
            _ => std::future::pending().await,
        }
    }

    async fn html(&self) -> Result<String, ScrapeError> {
        Ok(self.current.as_ref().map(|p| p.html.clone()).unwrap_or_default())
    }

    async fn body_text(&self) -> Result<String, ScrapeError> {
        Ok(self.current.as_ref().map(|p| p.text.clone()).unwrap_or_default())
    }

    async fn close(self: Box<Self>) -> Result<(), ScrapeError> {
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}
