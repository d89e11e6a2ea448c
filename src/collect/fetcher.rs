//! Seed-page HTTP fetcher
//!
//! One GET against the seed URL with a browser-like identity and a bounded
//! timeout. There is nothing to salvage before link discovery, so every
//! failure here is fatal.

use crate::{BindError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Browser-like identifying header for the discovery fetch
///
/// Many sites serve link-free interstitials to unknown agents; presenting
/// as a desktop browser keeps the discovered link set representative of
/// what the rendering engine will see.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// Builds the HTTP client used for link discovery
pub fn build_http_client(timeout: Duration) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the seed page body
///
/// Any network error or non-success HTTP status aborts the run before any
/// rendering begins.
pub async fn fetch_seed(client: &Client, seed_url: &Url) -> Result<String> {
    let response = client
        .get(seed_url.as_str())
        .send()
        .await
        .map_err(|e| BindError::SeedFetch {
            url: seed_url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(BindError::SeedStatus {
            url: seed_url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| BindError::SeedFetch {
        url: seed_url.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(Duration::from_secs(15));
        assert!(client.is_ok());
    }
}
