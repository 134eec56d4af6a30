//! Configuration schema for a wrapped application.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! The config is written once at build/packaging time and read at startup;
//! the only field the shell ever writes back is `maximize` (cleared after
//! its first application so later launches do not force it).

use serde::{Deserialize, Serialize};

/// How the app integrates with the system tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TrayMode {
    /// No tray icon.
    #[default]
    Off,
    /// Tray icon present; closing the window hides to tray.
    On,
    /// Tray icon present and the main window starts hidden.
    StartInTray,
}

impl TrayMode {
    /// Whether a tray icon is present at all.
    pub fn enabled(&self) -> bool {
        !matches!(self, TrayMode::Off)
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The URL this app wraps. Navigation stays inside its registrable
    /// domain unless `internal_urls` overrides the policy.
    pub target_url: String,
    /// Application / window title.
    pub name: String,
    /// Optional regex; when set, a candidate URL is internal exactly when
    /// the pattern matches it.
    pub internal_urls: Option<String>,

    /// Build-time zoom factor. `zoom_reset` restores exactly this value.
    pub zoom: f64,
    /// Custom user agent applied to every window.
    pub user_agent: Option<String>,
    /// Proxy endpoint as `host:port`, applied to every window.
    pub proxy_rules: Option<String>,
    /// CSS injected into every page of every window.
    pub inject_css: Option<String>,

    pub tray: TrayMode,
    /// Close really quits, even on platforms that normally hide to dock/tray.
    pub fast_quit: bool,
    /// Block external URLs outright instead of handing them to the OS browser.
    pub block_external_urls: bool,
    /// Clear session storage + HTTP cache at startup and on close.
    pub clear_cache: bool,
    /// Derive a dock badge from bracketed counts in the page title.
    /// When false, notification events drive a static badge instead.
    pub counter: bool,
    /// Request dock attention when the badge count increases.
    pub bounce: bool,
    /// Start maximized. Cleared after the first launch that applies it.
    pub maximize: bool,
    pub always_on_top: bool,
    pub hide_window_frame: bool,
    pub full_screen: bool,
    /// React to a second-instance signal by focusing the existing window.
    pub single_instance: bool,

    pub width: u32,
    pub height: u32,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_url: "https://example.com/".into(),
            name: "Sitewrap".into(),
            internal_urls: None,
            zoom: 1.0,
            user_agent: None,
            proxy_rules: None,
            inject_css: None,
            tray: TrayMode::Off,
            fast_quit: false,
            block_external_urls: false,
            clear_cache: false,
            counter: false,
            bounce: false,
            maximize: false,
            always_on_top: false,
            hide_window_frame: false,
            full_screen: false,
            single_instance: false,
            width: 1280,
            height: 800,
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
            x: None,
            y: None,
        }
    }
}
