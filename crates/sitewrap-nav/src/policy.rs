//! Internal/external URL classification.
//!
//! A candidate navigation target is internal when it stays on the same
//! registrable domain as the reference URL, or matches an explicit
//! override pattern. Classification is a pure function of its inputs:
//! no network access, no hidden state, and it never panics — a URL that
//! does not parse is classified external so navigation keeps working.

use regex::Regex;
use url::{Host, Url};

/// Decide whether `candidate` counts as part of the wrapped application.
///
/// - `about:blank` is always internal (probe windows load it).
/// - With `override_pattern`, internality is exactly "pattern matches
///   candidate"; a match-everything pattern disables the policy.
/// - Otherwise the registrable domains of candidate and reference are
///   compared, so subdomains and subpaths stay internal.
pub fn is_internal(reference: &str, candidate: &str, override_pattern: Option<&Regex>) -> bool {
    if candidate == "about:blank" {
        return true;
    }

    if let Some(pattern) = override_pattern {
        return pattern.is_match(candidate);
    }

    match (registrable_domain(reference), registrable_domain(candidate)) {
        (Some(reference), Some(candidate)) => reference == candidate,
        // Either side unparseable or host-less: fail open to external.
        _ => false,
    }
}

/// The domain+suffix pair used for same-site membership, e.g.
/// `sub.medium.com` → `medium.com`. IP hosts compare whole.
pub fn registrable_domain(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    match url.host()? {
        Host::Domain(domain) => {
            let domain = domain.trim_end_matches('.');
            let labels: Vec<&str> = domain.rsplit('.').take(2).collect();
            let labels: Vec<&str> = labels.into_iter().rev().collect();
            Some(labels.join(".").to_ascii_lowercase())
        }
        Host::Ipv4(addr) => Some(addr.to_string()),
        Host::Ipv6(addr) => Some(addr.to_string()),
    }
}
