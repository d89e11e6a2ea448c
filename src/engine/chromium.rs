//! Chromium-backed rendering engine
//!
//! Each session launches its own headless Chromium process over CDP. That
//! is deliberately heavier than sharing one browser across workers: a
//! crashed or wedged renderer only ever takes down its own page, which is
//! the failure-isolation property the pool relies on.

use crate::engine::{EngineError, EngineSession, PageGeometry, RenderEngine};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

/// Launches one headless Chromium per render invocation
#[derive(Debug, Default)]
pub struct ChromiumEngine;

impl ChromiumEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RenderEngine for ChromiumEngine {
    async fn start_session(&self) -> Result<Box<dyn EngineSession>, EngineError> {
        let config = BrowserConfig::builder()
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .build()
            .map_err(EngineError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| EngineError::Launch(e.to_string()))?;

        // The CDP event loop must be polled for the session to make
        // progress; it ends when the browser process goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| EngineError::Session(e.to_string()))?;

        Ok(Box::new(ChromiumSession {
            browser,
            page,
            handler_task,
        }))
    }
}

/// One exclusively-owned Chromium session
struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl EngineSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<(), EngineError> {
        self.page
            .goto(url)
            .await
            .map(|_| ())
            .map_err(|e| EngineError::Navigation(e.to_string()))
    }

    async fn current_url(&mut self) -> Result<String, EngineError> {
        self.page
            .url()
            .await
            .map_err(|e| EngineError::Session(e.to_string()))?
            .ok_or_else(|| EngineError::Session("page has no URL".to_string()))
    }

    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value, EngineError> {
        let evaluation = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| EngineError::Script(e.to_string()))?;

        // Statements evaluating to undefined have no JSON value
        Ok(evaluation
            .into_value::<serde_json::Value>()
            .unwrap_or(serde_json::Value::Null))
    }

    async fn export_pdf(&mut self, geometry: &PageGeometry) -> Result<Vec<u8>, EngineError> {
        let params = PrintToPdfParams {
            landscape: Some(false),
            display_header_footer: Some(false),
            print_background: Some(geometry.print_background),
            scale: Some(geometry.scale),
            paper_width: Some(geometry.paper_width),
            paper_height: Some(geometry.paper_height),
            margin_top: Some(geometry.margin),
            margin_bottom: Some(geometry.margin),
            margin_left: Some(geometry.margin),
            margin_right: Some(geometry.margin),
            prefer_css_page_size: Some(false),
            ..Default::default()
        };

        self.page
            .pdf(params)
            .await
            .map_err(|e| EngineError::Export(e.to_string()))
    }

    async fn close(&mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("Browser close failed: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Browser wait failed: {}", e);
        }
        self.handler_task.abort();
    }
}
