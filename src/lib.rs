//! Sitebind: one-level site crawler and PDF binder
//!
//! This crate crawls a single website's link graph one level deep, renders
//! each discovered page in a headless browser, exports every render as a
//! paginated PDF, and merges the per-page documents into one ordered
//! artifact. A single page failing never aborts the batch; the merge order
//! is always the discovery order, regardless of which worker finishes first.

pub mod assemble;
pub mod collect;
pub mod config;
pub mod engine;
pub mod render;
pub mod run;
pub mod url;

use thiserror::Error;

/// Fatal error type for sitebind runs
///
/// Anything represented here aborts the whole run. Per-page failures are
/// deliberately *not* errors; they are [`render::FailureReason`] values
/// carried inside [`render::RenderResult`] and never unwind past the
/// worker boundary.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch seed page {url}: {source}")]
    SeedFetch { url: String, source: reqwest::Error },

    #[error("Seed page {url} returned HTTP {status}")]
    SeedStatus { url: String, status: u16 },

    #[error("No internal links found on the seed page after filtering")]
    NoLinksFound,

    #[error("No documents were produced; nothing to merge")]
    NoDocumentsProduced,

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Merge failed: {0}")]
    Merge(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for sitebind operations
pub type Result<T> = std::result::Result<T, BindError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use collect::{collect_links, TargetUrl};
pub use config::Config;
pub use engine::{EngineSession, PageGeometry, RenderEngine};
pub use render::{render_all, render_page, FailureReason, RenderResult};
pub use run::{run, run_with_engine, RunSummary};
