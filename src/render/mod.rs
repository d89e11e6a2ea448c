//! Page rendering: the per-page worker and the bounded worker pool
//!
//! Every target produces exactly one [`RenderResult`], success or failure.
//! Failures carry the page index so the assembler can still reconcile the
//! batch; they never unwind past the worker boundary and never abort
//! sibling workers.

mod pool;
mod worker;

pub use pool::render_all;
pub use worker::render_page;

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Why one page failed to render
///
/// Per-unit recoverable by definition: a value, not an error, so it cannot
/// propagate past the worker that produced it.
#[derive(Debug, Clone, Error)]
pub enum FailureReason {
    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("redirected to blocked domain {0}")]
    BlockedRedirect(String),

    #[error("page not ready within {0:?}")]
    ReadinessTimeout(Duration),

    #[error("export failed: {0}")]
    Export(String),

    #[error("exported document is empty or missing")]
    EmptyOutput,

    #[error("render exceeded the {0:?} deadline")]
    DeadlineExceeded(Duration),

    #[error("render worker crashed: {0}")]
    Crashed(String),
}

/// Outcome of rendering one target page
#[derive(Debug, Clone)]
pub enum RenderResult {
    /// The page was exported and verified; `path` points at its blob
    Success { index: usize, path: PathBuf },

    /// The page failed; the batch continues without it
    Failure { index: usize, reason: FailureReason },
}

impl RenderResult {
    /// The caller-assigned index this result belongs to
    pub fn index(&self) -> usize {
        match self {
            Self::Success { index, .. } => *index,
            Self::Failure { index, .. } => *index,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Index-keyed path of a page's document blob inside the working directory
pub fn blob_path(work_dir: &Path, index: usize) -> PathBuf {
    work_dir.join(format!("page_{}.pdf", index))
}
