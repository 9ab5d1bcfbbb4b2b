//! chromiumoxide-backed rendering collaborator.
//!
//! One `RenderSession` maps to one headless Chrome instance, launched per
//! operation and torn down when the operation finishes. chromiumoxide
//! pages have no Drop cleanup; they require an explicit async `close`,
//! which is why release is part of the trait contract rather than left to
//! scope exit.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::BrowserConfig;

use super::{RenderError, RenderPage, RenderSession, Renderer, WaitFor};

/// Interval between readiness-selector polls.
const SELECTOR_POLL_MS: u64 = 100;

pub struct ChromiumRenderer {
    config: BrowserConfig,
}

impl ChromiumRenderer {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn open_session(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        let mut builder = ChromeConfig::builder();
        if !self.config.headless {
            builder = builder.with_head();
        }
        let chrome_config = builder
            .build()
            .map_err(RenderError::Launch)?;

        let (browser, mut handler) = Browser::launch(chrome_config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        // The handler stream must be polled for the browser to make
        // progress; it ends when the browser process goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        debug!("Launched browser session");
        Ok(Box::new(ChromiumSession {
            browser,
            handler_task,
            timeout: Duration::from_secs(self.config.navigation_timeout_secs),
        }))
    }
}

struct ChromiumSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    timeout: Duration,
}

#[async_trait]
impl RenderSession for ChromiumSession {
    async fn open_page(&self) -> Result<Box<dyn RenderPage>, RenderError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))?;
        Ok(Box::new(ChromiumPage {
            page,
            timeout: self.timeout,
        }))
    }

    async fn close(self: Box<Self>) -> Result<(), RenderError> {
        let Self {
            mut browser,
            handler_task,
            ..
        } = *self;

        let result = browser
            .close()
            .await
            .map_err(|e| RenderError::Release(e.to_string()));
        if let Err(e) = browser.wait().await {
            debug!("Browser process wait failed: {}", e);
        }
        handler_task.abort();
        debug!("Browser session closed");
        result.map(|_| ())
    }
}

struct ChromiumPage {
    page: Page,
    timeout: Duration,
}

#[async_trait]
impl RenderPage for ChromiumPage {
    async fn navigate(&self, url: &str, wait: WaitFor) -> Result<(), RenderError> {
        tokio::time::timeout(self.timeout, self.page.goto(url))
            .await
            .map_err(|_| RenderError::Navigation(format!("timed out loading {}", url)))?
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        match wait {
            WaitFor::DomContentLoaded => {
                match tokio::time::timeout(self.timeout, self.page.wait_for_navigation()).await {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => warn!("Navigation wait failed for {}: {}", url, e),
                    Err(_) => warn!("Navigation wait timed out for {}", url),
                }
            }
            WaitFor::Selector(selector) => {
                let deadline = tokio::time::Instant::now() + self.timeout;
                loop {
                    if self.page.find_element(selector.as_str()).await.is_ok() {
                        break;
                    }
                    if tokio::time::Instant::now() >= deadline {
                        return Err(RenderError::Readiness(format!(
                            "selector '{}' never appeared on {}",
                            selector, url
                        )));
                    }
                    tokio::time::sleep(Duration::from_millis(SELECTOR_POLL_MS)).await;
                }
            }
        }
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, RenderError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| RenderError::Script(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| RenderError::Script(format!("unexpected script result: {}", e)))
    }

    async fn title(&self) -> Result<String, RenderError> {
        let title = self
            .page
            .get_title()
            .await
            .map_err(|e| RenderError::Script(e.to_string()))?;
        Ok(title.unwrap_or_default())
    }

    async fn close(self: Box<Self>) -> Result<(), RenderError> {
        self.page
            .close()
            .await
            .map_err(|e| RenderError::Release(e.to_string()))
    }
}
