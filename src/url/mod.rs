//! URL handling for sitebind
//!
//! Normalization here exists purely for deduplication: two hrefs that point
//! at the same page after query/fragment/trailing-slash stripping must
//! collapse to one render target. Domain helpers implement the
//! exact-host-match and blocklist-substring rules.

mod domain;
mod normalize;

pub use domain::{extract_domain, is_blocked_domain, same_host};
pub use normalize::normalize_target;
