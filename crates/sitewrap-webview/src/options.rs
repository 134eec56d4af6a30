//! Per-window content options and the policy inputs shared by all windows.

use regex::Regex;
use tracing::warn;

/// Policy inputs every window's handlers evaluate against.
///
/// Cloned into each handler closure at creation time; the values are
/// fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct NavigationRules {
    /// The wrapped site; internality is measured against this URL.
    pub reference_url: String,
    /// Optional override: internal exactly when this matches.
    pub override_pattern: Option<Regex>,
    /// Whether windows can join native tab groups on this platform.
    pub native_tabs_supported: bool,
    /// Block external URLs instead of handing them to the OS browser.
    pub block_external_urls: bool,
}

/// A proxy endpoint, parsed from the config's `host:port` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    pub host: String,
    pub port: String,
}

impl ProxyEndpoint {
    /// Parse a `host:port` proxy rule. Logs and returns `None` on a rule
    /// without a port; the window then runs without a proxy.
    pub fn parse(rules: &str) -> Option<Self> {
        match rules.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && !port.is_empty() => Some(Self {
                host: host.to_string(),
                port: port.to_string(),
            }),
            _ => {
                warn!(rules, "ignoring malformed proxy rule, expected host:port");
                None
            }
        }
    }
}

/// Everything needed to build one window's content area.
#[derive(Debug, Clone)]
pub struct WebViewOptions {
    /// Initial URL to load.
    pub url: String,
    /// Custom user agent, when configured.
    pub user_agent: Option<String>,
    /// Zoom factor applied after creation.
    pub zoom: f64,
    /// Proxy endpoint, when configured.
    pub proxy: Option<ProxyEndpoint>,
    /// CSS injected on every finished load, when configured.
    pub inject_css: Option<String>,
    /// JSON config payload pushed into the page on every finished load.
    pub config_payload: String,
    /// Whether devtools are available.
    pub devtools: bool,
}
