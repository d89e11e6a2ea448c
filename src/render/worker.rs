//! Render Worker: drives one engine session through the per-page protocol
//!
//! State machine per invocation: navigate, post-navigate blocked-host
//! check, bounded readiness wait, layout stabilization (style injection +
//! scroll-height convergence), export, verify. Every step's failure is
//! caught here, logged with the page index and URL, and converted to a
//! [`RenderResult::Failure`]. The session is torn down on every exit path,
//! and the whole invocation runs under an overall deadline so a
//! pathological infinite-scroll page cannot stall the batch.

use crate::collect::TargetUrl;
use crate::config::Config;
use crate::engine::{EngineSession, RenderEngine};
use crate::render::{blob_path, FailureReason, RenderResult};
use crate::url::{extract_domain, is_blocked_domain};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Presentation-normalizing injection applied before export
///
/// Disables animations and transitions, hides chrome-like regions, and
/// forces static positioning so fixed/sticky elements cannot overlap the
/// paginated content.
const STABILIZE_SCRIPT: &str = r#"
    document.body.style.zoom = '100%';

    var style = document.createElement('style');
    style.innerHTML = `
        * {
            animation: none !important;
            transition: none !important;
        }
        header, footer, nav, aside {
            display: none !important;
        }
        * {
            position: static !important;
        }
    `;
    document.head.appendChild(style);
"#;

const READY_STATE_SCRIPT: &str = "document.readyState";
const SCROLL_TO_BOTTOM_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";
const MEASURE_HEIGHT_SCRIPT: &str = "document.body.scrollHeight";

/// Poll interval while waiting for document readiness
const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Renders one target page inside an exclusively-owned engine session
///
/// Never returns an error: every failure is converted into a
/// [`RenderResult::Failure`] carrying the target's index, so a bad page
/// cannot abort the batch or its siblings.
pub async fn render_page(
    engine: &dyn RenderEngine,
    target: &TargetUrl,
    config: &Config,
) -> RenderResult {
    tracing::info!("[{}] Opening: {}", target.index, target.url);

    let mut session = match engine.start_session().await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("[{}] Failed to start session: {}", target.index, e);
            return RenderResult::Failure {
                index: target.index,
                reason: FailureReason::Navigation(format!("engine launch: {}", e)),
            };
        }
    };

    let outcome = tokio::time::timeout(
        config.page_deadline,
        drive_session(session.as_mut(), target, config),
    )
    .await;

    // Session lifetime is exactly one invocation; always torn down
    session.close().await;

    match outcome {
        Ok(Ok(path)) => {
            tracing::info!("[{}] PDF saved successfully", target.index);
            RenderResult::Success {
                index: target.index,
                path,
            }
        }
        Ok(Err(reason)) => {
            tracing::warn!("[{}] Failed ({}): {}", target.index, target.url, reason);
            RenderResult::Failure {
                index: target.index,
                reason,
            }
        }
        Err(_) => {
            tracing::warn!(
                "[{}] Deadline exceeded after {:?}: {}",
                target.index,
                config.page_deadline,
                target.url
            );
            RenderResult::Failure {
                index: target.index,
                reason: FailureReason::DeadlineExceeded(config.page_deadline),
            }
        }
    }
}

/// Runs the per-page protocol against a live session
async fn drive_session(
    session: &mut dyn EngineSession,
    target: &TargetUrl,
    config: &Config,
) -> Result<PathBuf, FailureReason> {
    // 1. Navigate
    session
        .navigate(target.url.as_str())
        .await
        .map_err(|e| FailureReason::Navigation(e.to_string()))?;

    // 2. Post-navigate check: a redirect can land on a blocked domain
    //    even though the discovered link did not
    let resolved = session
        .current_url()
        .await
        .map_err(|e| FailureReason::Navigation(e.to_string()))?;
    if let Some(host) = Url::parse(&resolved)
        .ok()
        .as_ref()
        .and_then(extract_domain)
    {
        if is_blocked_domain(&host, &config.blocked_domains) {
            return Err(FailureReason::BlockedRedirect(host));
        }
    }

    // 3. Readiness wait, bounded
    wait_for_ready(session, config.readiness_timeout).await?;

    // 4. Layout stabilization
    session
        .evaluate(STABILIZE_SCRIPT)
        .await
        .map_err(|e| FailureReason::Export(format!("stabilization: {}", e)))?;
    settle_scroll_height(session, config.scroll_settle_delay).await?;

    // 5. Export with fixed geometry, decode-free write to the blob path
    let bytes = session
        .export_pdf(&config.geometry)
        .await
        .map_err(|e| FailureReason::Export(e.to_string()))?;

    let path = blob_path(&config.work_dir, target.index);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| FailureReason::Export(format!("write {}: {}", path.display(), e)))?;

    // 6. Verify the blob exists and is non-empty
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|_| FailureReason::EmptyOutput)?;
    if metadata.len() == 0 {
        return Err(FailureReason::EmptyOutput);
    }

    Ok(path)
}

/// Polls `document.readyState` until it reports complete
///
/// Evaluation errors are treated as "not ready yet"; the timeout is the
/// only exit on a wedged page.
async fn wait_for_ready(
    session: &mut dyn EngineSession,
    timeout: Duration,
) -> Result<(), FailureReason> {
    tokio::time::timeout(timeout, async {
        loop {
            if let Ok(value) = session.evaluate(READY_STATE_SCRIPT).await {
                if value.as_str() == Some("complete") {
                    return;
                }
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    })
    .await
    .map_err(|_| FailureReason::ReadinessTimeout(timeout))
}

/// Scroll-to-bottom until the content height stops growing
///
/// Handles lazy/infinite-loaded content: each iteration scrolls, waits for
/// the settle delay, and re-measures. Convergence is two equal consecutive
/// measurements; the caller's overall deadline backstops pages that keep
/// growing forever.
async fn settle_scroll_height(
    session: &mut dyn EngineSession,
    settle_delay: Duration,
) -> Result<(), FailureReason> {
    let mut last_height = measure_height(session).await?;

    loop {
        session
            .evaluate(SCROLL_TO_BOTTOM_SCRIPT)
            .await
            .map_err(|e| FailureReason::Export(format!("scroll: {}", e)))?;
        tokio::time::sleep(settle_delay).await;

        let new_height = measure_height(session).await?;
        if new_height == last_height {
            return Ok(());
        }
        last_height = new_height;
    }
}

async fn measure_height(session: &mut dyn EngineSession) -> Result<i64, FailureReason> {
    let value = session
        .evaluate(MEASURE_HEIGHT_SCRIPT)
        .await
        .map_err(|e| FailureReason::Export(format!("measure height: {}", e)))?;

    value
        .as_f64()
        .map(|h| h as i64)
        .ok_or_else(|| FailureReason::Export("page height was not numeric".to_string()))
}
