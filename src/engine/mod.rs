//! Rendering-engine capability surface
//!
//! The render worker drives a headless browser through a small trait pair:
//! [`RenderEngine`] hands out exclusively-owned sessions, and
//! [`EngineSession`] exposes exactly the capabilities the pipeline consumes
//! (navigate, read the resolved URL, run script, export to PDF, tear down).
//! Keeping the seam this narrow is what makes the worker state machine
//! testable against a scripted fake backend.

mod chromium;

pub use chromium::ChromiumEngine;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the rendering engine
///
/// These never surface to the caller of a render worker directly; the
/// worker converts them into per-page failure reasons.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to launch rendering engine: {0}")]
    Launch(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("script evaluation failed: {0}")]
    Script(String),

    #[error("document export failed: {0}")]
    Export(String),

    #[error("engine session error: {0}")]
    Session(String),
}

/// Fixed, deterministic export geometry
///
/// A4 paper with conservative margins and a slight scale-down, so the
/// output is reproducible across runs and overlapping-content artifacts
/// are minimized. Dimensions are in inches, as CDP expects.
#[derive(Debug, Clone)]
pub struct PageGeometry {
    pub paper_width: f64,
    pub paper_height: f64,
    pub margin: f64,
    pub scale: f64,
    pub print_background: bool,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            paper_width: 8.27,
            paper_height: 11.69,
            margin: 0.4,
            scale: 0.9,
            print_background: true,
        }
    }
}

/// Factory for exclusively-owned rendering sessions
///
/// One session serves exactly one render invocation; the worker tears it
/// down on every exit path.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    async fn start_session(&self) -> Result<Box<dyn EngineSession>, EngineError>;
}

/// One live browsing session
#[async_trait]
pub trait EngineSession: Send {
    /// Instructs the engine to load the given URL
    async fn navigate(&mut self, url: &str) -> Result<(), EngineError>;

    /// Reads the engine's current resolved URL (after any redirects)
    async fn current_url(&mut self) -> Result<String, EngineError>;

    /// Executes a script and returns its JSON-converted result
    ///
    /// Statements that evaluate to `undefined` yield `Value::Null`.
    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value, EngineError>;

    /// Exports the current page as a paginated PDF
    async fn export_pdf(&mut self, geometry: &PageGeometry) -> Result<Vec<u8>, EngineError>;

    /// Tears the session down; best-effort, called on every exit path
    async fn close(&mut self);
}
