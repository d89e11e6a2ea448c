//! Worker pool: bounded fan-out over render targets
//!
//! All targets are submitted up front; a semaphore caps how many engine
//! sessions are open at once. The call joins every spawned worker before
//! returning (barrier semantics), yielding exactly one [`RenderResult`]
//! per target. There is no cross-worker cancellation and no retry: a
//! failing page only ever abandons its own session.

use crate::collect::TargetUrl;
use crate::config::Config;
use crate::engine::RenderEngine;
use crate::render::{render_page, FailureReason, RenderResult};
use crate::{BindError, ConfigError, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Renders every target with at most `config.concurrency` open sessions
///
/// Results come back in submission (index) order, but each carries its own
/// index, so callers must not rely on position. A worker that panics is
/// reconciled to a [`FailureReason::Crashed`] entry for its index rather
/// than being dropped, preserving the one-result-per-target contract.
///
/// # Errors
///
/// * [`BindError::Config`] - the concurrency limit is zero; rejected
///   before any session is opened
pub async fn render_all(
    engine: Arc<dyn RenderEngine>,
    targets: &[TargetUrl],
    config: Arc<Config>,
) -> Result<Vec<RenderResult>> {
    if config.concurrency < 1 {
        return Err(BindError::Config(ConfigError::Validation(format!(
            "concurrency must be at least 1, got {}",
            config.concurrency
        ))));
    }

    let semaphore = Arc::new(Semaphore::new(config.concurrency));

    // Submission-order handles keep every index recoverable even if a
    // worker task dies without producing a result.
    let mut handles = Vec::with_capacity(targets.len());
    for target in targets {
        let engine = Arc::clone(&engine);
        let config = Arc::clone(&config);
        let semaphore = Arc::clone(&semaphore);
        let target = target.clone();
        let index = target.index;

        let handle = tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(p) => p,
                Err(e) => {
                    return RenderResult::Failure {
                        index: target.index,
                        reason: FailureReason::Crashed(format!("pool shut down: {}", e)),
                    }
                }
            };
            render_page(engine.as_ref(), &target, &config).await
        });

        handles.push((index, handle));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (index, handle) in handles {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                tracing::error!("[{}] Render task crashed: {}", index, e);
                results.push(RenderResult::Failure {
                    index,
                    reason: FailureReason::Crashed(e.to_string()),
                });
            }
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, EngineSession};
    use async_trait::async_trait;

    struct NoopEngine;

    #[async_trait]
    impl RenderEngine for NoopEngine {
        async fn start_session(&self) -> std::result::Result<Box<dyn EngineSession>, EngineError> {
            Err(EngineError::Launch("noop".to_string()))
        }
    }

    fn zero_concurrency_config() -> Config {
        let mut config = Config::new("https://example.com", 1).unwrap();
        config.concurrency = 0;
        config
    }

    #[tokio::test]
    async fn test_zero_concurrency_rejected_before_rendering() {
        let config = Arc::new(zero_concurrency_config());
        let result = render_all(Arc::new(NoopEngine), &[], config).await;
        assert!(matches!(
            result.unwrap_err(),
            BindError::Config(ConfigError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_target_list_yields_no_results() {
        let config = Arc::new(Config::new("https://example.com", 2).unwrap());
        let results = render_all(Arc::new(NoopEngine), &[], config).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_session_launch_failure_is_per_page() {
        let config = Arc::new(Config::new("https://example.com", 2).unwrap());
        let targets = vec![
            TargetUrl {
                index: 1,
                url: url::Url::parse("https://example.com/a").unwrap(),
            },
            TargetUrl {
                index: 2,
                url: url::Url::parse("https://example.com/b").unwrap(),
            },
        ];

        let results = render_all(Arc::new(NoopEngine), &targets, config)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        for (result, expected_index) in results.iter().zip(1..) {
            assert_eq!(result.index(), expected_index);
            assert!(!result.is_success());
        }
    }
}
