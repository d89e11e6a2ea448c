//! Run configuration
//!
//! The whole run is driven by one immutable [`Config`] value built from the
//! CLI arguments plus fixed constants. It is threaded through the
//! coordinator and every worker; nothing reads ambient global state.

mod validation;

pub use validation::validate;

use crate::engine::PageGeometry;
use crate::{ConfigError, ConfigResult};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Domain substrings excluded from rendering
///
/// Social/messaging platforms that internal links commonly point at via
/// share buttons. Matching is substring containment on the lowercased host.
pub const BLOCKED_DOMAINS: &[&str] = &[
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "youtube.com",
    "wa.me",
    "t.me",
];

/// Immutable configuration for one sitebind run
#[derive(Debug, Clone)]
pub struct Config {
    /// Entry-point page from which same-domain links are discovered
    pub seed_url: Url,

    /// Maximum number of concurrently open browser sessions
    pub concurrency: usize,

    /// Transient per-run directory for page_<index>.pdf blobs
    pub work_dir: PathBuf,

    /// Path of the final merged artifact (overwritten each run)
    pub output_path: PathBuf,

    /// Domain substrings excluded from rendering
    pub blocked_domains: Vec<String>,

    /// Timeout for the seed-page HTTP fetch
    pub fetch_timeout: Duration,

    /// Upper bound on waiting for document.readyState == "complete"
    pub readiness_timeout: Duration,

    /// Delay between scroll-to-bottom iterations while waiting for
    /// lazy-loaded content height to converge
    pub scroll_settle_delay: Duration,

    /// Overall deadline for a single render invocation; backstops the
    /// convergence-terminated stabilization loop
    pub page_deadline: Duration,

    /// Fixed export geometry so output is reproducible across runs
    pub geometry: PageGeometry,
}

impl Config {
    /// Builds a validated configuration from the two CLI inputs
    pub fn new(seed_url: &str, concurrency: usize) -> ConfigResult<Self> {
        let seed_url = Url::parse(seed_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", seed_url, e)))?;

        let config = Self {
            seed_url,
            concurrency,
            work_dir: PathBuf::from("pdf_pages"),
            output_path: PathBuf::from("merged.pdf"),
            blocked_domains: BLOCKED_DOMAINS.iter().map(|s| s.to_string()).collect(),
            fetch_timeout: Duration::from_secs(15),
            readiness_timeout: Duration::from_secs(15),
            scroll_settle_delay: Duration::from_secs(2),
            page_deadline: Duration::from_secs(120),
            geometry: PageGeometry::default(),
        };

        validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_config() {
        let config = Config::new("https://example.com", 2).unwrap();
        assert_eq!(config.seed_url.as_str(), "https://example.com/");
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.work_dir, PathBuf::from("pdf_pages"));
        assert_eq!(config.output_path, PathBuf::from("merged.pdf"));
    }

    #[test]
    fn test_new_rejects_malformed_url() {
        let result = Config::new("not a url", 2);
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_new_rejects_zero_concurrency() {
        let result = Config::new("https://example.com", 0);
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_blocklist_is_populated() {
        let config = Config::new("https://example.com", 2).unwrap();
        assert!(config.blocked_domains.iter().any(|d| d == "facebook.com"));
        assert!(config.blocked_domains.iter().any(|d| d == "t.me"));
    }
}
