//! Headless page rendering
//!
//! One long-lived Chromium session is reused across every page load in a
//! run, so cookies and session state persist naturally across the crawl.
//! Each URL gets its own rendering surface (a browser tab) that is closed
//! after the HTML is captured. Navigation failures and timeouts fail the
//! single URL with no retry; only the browser failing to launch at all is
//! fatal to the run.

use crate::{LensError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::EventResponseReceived;
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Timeout for page navigation and content capture
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(15);

/// How long to wait for the captured navigation status after the DOM
/// has been read
const STATUS_WAIT: Duration = Duration::from_secs(2);

/// Result of rendering one URL
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Fully rendered HTML after script execution
    pub html: String,

    /// Real HTTP status of the navigation response; 200 only when the
    /// status could not be observed
    pub status_code: u16,
}

/// Rendering seam consumed by the crawl loop
///
/// The production implementation drives a headless browser; tests supply
/// canned pages.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<RenderedPage>;
}

/// Chromium-backed renderer owning the long-lived browser session
pub struct ChromeRenderer {
    browser: Browser,
    handler_task: JoinHandle<()>,
    navigation_timeout: Duration,
}

impl ChromeRenderer {
    /// Launches the headless browser session
    ///
    /// This is the run's only fatal initialization step: without a
    /// rendering engine no page can be processed.
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .build()
            .map_err(LensError::BrowserInit)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| LensError::BrowserInit(e.to_string()))?;

        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        Ok(Self {
            browser,
            handler_task,
            navigation_timeout: NAVIGATION_TIMEOUT,
        })
    }

    /// Shuts the browser session down
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("browser close error: {}", e);
        }
        self.handler_task.abort();
    }

    /// Navigates and captures HTML plus the navigation response status
    async fn render_on_page(&self, page: &Page, url: &str) -> Result<(String, u16)> {
        // The first HTML document response observed on the page is the
        // navigation response, which carries the real status even after
        // redirects.
        let (status_tx, status_rx) = oneshot::channel::<u16>();
        let status_task = match page.event_listener::<EventResponseReceived>().await {
            Ok(mut events) => Some(tokio::spawn(async move {
                while let Some(event) = events.next().await {
                    let mime = event.response.mime_type.to_lowercase();
                    if mime.starts_with("text/html") || mime.starts_with("application/xhtml+xml") {
                        let _ = status_tx.send(event.response.status as u16);
                        break;
                    }
                }
            })),
            Err(e) => {
                tracing::debug!("status listener unavailable for {}: {}", url, e);
                None
            }
        };

        let navigated = tokio::time::timeout(self.navigation_timeout, page.goto(url)).await;
        match navigated {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                if let Some(task) = status_task {
                    task.abort();
                }
                return Err(LensError::Render {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
            Err(_) => {
                if let Some(task) = status_task {
                    task.abort();
                }
                return Err(LensError::NavigationTimeout {
                    url: url.to_string(),
                });
            }
        }

        // Let in-page scripts settle before reading the DOM (best effort)
        let _ = tokio::time::timeout(self.navigation_timeout, page.wait_for_navigation()).await;

        let html = match tokio::time::timeout(self.navigation_timeout, page.content()).await {
            Ok(Ok(html)) => html,
            Ok(Err(e)) => {
                if let Some(task) = status_task {
                    task.abort();
                }
                return Err(LensError::Render {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
            Err(_) => {
                if let Some(task) = status_task {
                    task.abort();
                }
                return Err(LensError::NavigationTimeout {
                    url: url.to_string(),
                });
            }
        };

        let status_code = match status_task {
            Some(task) => {
                let status = tokio::time::timeout(STATUS_WAIT, status_rx)
                    .await
                    .ok()
                    .and_then(|received| received.ok())
                    .unwrap_or(200);
                task.abort();
                status
            }
            None => 200,
        };

        Ok((html, status_code))
    }
}

#[async_trait]
impl PageRenderer for ChromeRenderer {
    async fn render(&self, url: &str) -> Result<RenderedPage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| LensError::Render {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let result = self.render_on_page(&page, url).await;

        // Close the surface whether or not the render succeeded; the
        // browser session itself stays alive for the rest of the run.
        if let Err(e) = page.close().await {
            tracing::debug!("page close error for {}: {}", url, e);
        }

        result.map(|(html, status_code)| RenderedPage { html, status_code })
    }
}
