//! Run Coordinator
//!
//! Sequences discovery, rendering, and assembly; owns the transient
//! working directory. Cleanup of that directory is best-effort and happens
//! whether or not the render/merge phase succeeded. Fatal errors propagate
//! to the caller; per-page failures only show up in the summary counts.

use crate::assemble::merge_documents;
use crate::collect::{build_http_client, collect_links, TargetUrl};
use crate::config::Config;
use crate::engine::{ChromiumEngine, RenderEngine};
use crate::render::{render_all, RenderResult};
use crate::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Counts reported once at the end of a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Targets discovered on the seed page
    pub discovered: usize,
    /// Pages that rendered and verified successfully
    pub rendered: usize,
    /// Pages recorded as failed for this run (no retries)
    pub failed: usize,
    /// Documents that made it into the artifact
    pub merged: usize,
    /// Where the artifact was written
    pub output_path: PathBuf,
}

/// Runs the full pipeline with the default Chromium engine
pub async fn run(config: Config) -> Result<RunSummary> {
    run_with_engine(config, Arc::new(ChromiumEngine::new())).await
}

/// Runs the full pipeline against an arbitrary rendering engine
///
/// The engine parameter is the seam the integration tests use; production
/// callers go through [`run`].
pub async fn run_with_engine(config: Config, engine: Arc<dyn RenderEngine>) -> Result<RunSummary> {
    crate::config::validate(&config)?;
    let config = Arc::new(config);

    let client = build_http_client(config.fetch_timeout)?;
    let targets = collect_links(&client, &config).await?;

    tokio::fs::create_dir_all(&config.work_dir).await?;

    // Cleanup must run regardless of how this phase ends
    let outcome = render_and_merge(Arc::clone(&config), engine, &targets).await;

    match tokio::fs::remove_dir_all(&config.work_dir).await {
        Ok(()) => tracing::info!("Temporary PDF files deleted"),
        Err(e) => tracing::warn!(
            "Failed to remove working directory {}: {}",
            config.work_dir.display(),
            e
        ),
    }

    let summary = outcome?;
    tracing::info!(
        "Run complete: {} discovered, {} rendered, {} failed, {} merged into {}",
        summary.discovered,
        summary.rendered,
        summary.failed,
        summary.merged,
        summary.output_path.display()
    );
    Ok(summary)
}

async fn render_and_merge(
    config: Arc<Config>,
    engine: Arc<dyn RenderEngine>,
    targets: &[TargetUrl],
) -> Result<RunSummary> {
    let results = render_all(engine, targets, Arc::clone(&config)).await?;

    let mut rendered = 0;
    let mut failed = 0;
    for result in &results {
        match result {
            RenderResult::Success { .. } => rendered += 1,
            RenderResult::Failure { index, reason } => {
                failed += 1;
                tracing::warn!("[{}] Not merged: {}", index, reason);
            }
        }
    }

    let merged = merge_documents(&results, &config.output_path)?;

    Ok(RunSummary {
        discovered: targets.len(),
        rendered,
        failed,
        merged,
        output_path: config.output_path.clone(),
    })
}
