//! Chromium-backed sessions using chromiumoxide.

use super::{BrowserEngine, Readiness, Session};
use crate::error::{EngineError, ScrapeError};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Delay between readiness checks.
const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Added on top of the caller's per-step limit for raw CDP commands, so the
/// caller's own timer always expires first.
const COMMAND_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// CDP request timeout for a run whose navigation steps are bounded by `limit`.
pub fn command_timeout(limit: Duration) -> Duration {
    limit.saturating_add(COMMAND_TIMEOUT_MARGIN)
}

/// Map the `errorText` of a `Page.navigate` reply to a result.
fn navigation_outcome(url: &str, error_text: Option<String>) -> Result<(), ScrapeError> {
    match error_text {
        Some(reason) if !reason.is_empty() => Err(ScrapeError::Navigation {
            url: url.to_string(),
            reason,
        }),
        _ => Ok(()),
    }
}

/// Script that is true once the navigated document has the element
/// matching `selector`.
fn readiness_script(selector: &str) -> String {
    let quoted = serde_json::to_string(selector).unwrap_or_else(|_| "\"body\"".to_string());
    format!(
        "document.location.href !== 'about:blank' && document.querySelector({quoted}) !== null"
    )
}

/// Headless Chromium shared by all extraction tasks of a run.
pub struct ChromiumEngine {
    browser: Browser,
    handler: JoinHandle<()>,
    active_count: Arc<AtomicUsize>,
}

impl ChromiumEngine {
    /// Launch a headless Chromium instance.
    ///
    /// When `executable` is `None`, chromiumoxide looks for a Chrome/Chromium
    /// install on its own. `step_limit` is the per-step bound the caller puts
    /// on navigation and readiness; CDP commands are allowed a little longer.
    #[instrument(level = "info", skip_all, fields(executable = ?executable))]
    pub async fn launch(
        executable: Option<PathBuf>,
        step_limit: Duration,
    ) -> Result<Self, EngineError> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(command_timeout(step_limit))
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if let Some(path) = executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(EngineError::Config)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| EngineError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "CDP handler event error");
                }
            }
        });

        info!("Browser launched");
        Ok(Self {
            browser,
            handler,
            active_count: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Close the browser and wait for its handler task to finish.
    #[instrument(level = "info", skip_all)]
    pub async fn shutdown(mut self) {
        let leaked = self.active_count.load(Ordering::Relaxed);
        if leaked > 0 {
            warn!(sessions = leaked, "Shutting down with sessions still open");
        }
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "Browser close failed");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "Waiting for browser exit failed");
        }
        if let Err(e) = self.handler.await {
            warn!(error = %e, "Browser handler task ended abnormally");
        }
        info!("Browser stopped");
    }
}

#[async_trait]
impl BrowserEngine for ChromiumEngine {
    async fn open(&self) -> Result<Box<dyn Session>, ScrapeError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::Session(format!("failed to open page: {e}")))?;

        self.active_count.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(ChromiumSession {
            page,
            active_count: Arc::clone(&self.active_count),
        }))
    }

    fn active_sessions(&self) -> usize {
        self.active_count.load(Ordering::Relaxed)
    }
}

/// One Chromium tab.
pub struct ChromiumSession {
    page: Page,
    active_count: Arc<AtomicUsize>,
}

impl ChromiumSession {
    async fn evaluate_bool(&self, script: &str) -> Result<bool, ScrapeError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| ScrapeError::Session(format!("script evaluation failed: {e}")))?
            .into_value::<bool>()
            .map_err(|e| ScrapeError::Session(format!("unexpected script result: {e}")))
    }

    async fn evaluate_string(&self, script: &str) -> Result<String, ScrapeError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| ScrapeError::Session(format!("script evaluation failed: {e}")))?
            .into_value::<String>()
            .map_err(|e| ScrapeError::Session(format!("unexpected script result: {e}")))
    }
}

#[async_trait]
impl Session for ChromiumSession {
    // `Page.navigate` returns once the response is committed; waiting for the
    // load event is left to `wait_ready`, under the caller's timer.
    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError> {
        let reply = self
            .page
            .execute(NavigateParams::new(url))
            .await
            .map_err(|e| ScrapeError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        navigation_outcome(url, reply.result.error_text)
    }

    async fn wait_ready(&mut self, readiness: Readiness) -> Result<(), ScrapeError> {
        let script = readiness_script(readiness.selector());
        loop {
            match self.evaluate_bool(&script).await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                // Evaluation races with the document swap; try again.
                Err(e) => debug!(error = %e, "Readiness check failed"),
            }
            sleep(READY_POLL_INTERVAL).await;
        }
    }

    async fn html(&self) -> Result<String, ScrapeError> {
        self.page
            .content()
            .await
            .map_err(|e| ScrapeError::Session(format!("failed to read page HTML: {e}")))
    }

    async fn body_text(&self) -> Result<String, ScrapeError> {
        self.evaluate_string("document.body.innerText").await
    }

    async fn close(self: Box<Self>) -> Result<(), ScrapeError> {
        self.active_count.fetch_sub(1, Ordering::Relaxed);
        self.page
            .close()
            .await
            .map_err(|e| ScrapeError::Session(format!("failed to close page: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_timeout_outlasts_step_limit() {
        let limit = Duration::from_secs(60);
        assert!(command_timeout(limit) > limit);
        assert!(command_timeout(Duration::from_secs(120)) > Duration::from_secs(30));
        assert_eq!(command_timeout(Duration::MAX), Duration::MAX);
    }

    #[test]
    fn test_navigation_error_text_is_a_failure() {
        let err = navigation_outcome("https://x.test", Some("net::ERR_NAME_NOT_RESOLVED".into()))
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Navigation { ref reason, .. } if reason.contains("NAME_NOT_RESOLVED")));
        assert!(navigation_outcome("https://x.test", None).is_ok());
        assert!(navigation_outcome("https://x.test", Some(String::new())).is_ok());
    }

    #[test]
    fn test_readiness_script_quotes_selector() {
        let script = readiness_script(".table-top20 tbody tr");
        assert!(script.contains("querySelector(\".table-top20 tbody tr\")"));
        assert!(script.contains("about:blank"));
    }

    #[tokio::test]
    #[ignore] // Requires Chromium to be installed
    async fn test_chromium_navigate_and_read() {
        let engine = ChromiumEngine::launch(None, Duration::from_secs(60))
            .await
            .expect("failed to launch browser");
        let mut session = engine.open().await.expect("failed to open session");

        session
            .navigate("data:text/html,<table><tbody><tr><td>1</td></tr></tbody></table><p>1. Rust</p>")
            .await
            .expect("navigation failed");
        tokio::time::timeout(
            Duration::from_secs(10),
            session.wait_ready(Readiness::Selector("table")),
        )
        .await
        .expect("table never appeared")
        .expect("readiness check failed");

        let html = session.html().await.expect("html failed");
        assert!(html.contains("<td>1</td>"));
        let text = session.body_text().await.expect("body text failed");
        assert!(text.contains("1. Rust"));

        session.close().await.expect("close failed");
        assert_eq!(engine.active_sessions(), 0);
        engine.shutdown().await;
    }
}
