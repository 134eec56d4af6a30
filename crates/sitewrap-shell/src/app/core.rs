//! ShellApp struct definition and constructor.

use std::collections::HashMap;
use std::path::PathBuf;

use regex::Regex;
use tracing::warn;
use winit::window::{Window, WindowId};

use sitewrap_common::WindowToken;
use sitewrap_config::AppConfig;
use sitewrap_platform::{dock_badge, BadgeSink, Platform};
use sitewrap_webview::{NavigationRules, WebViewHandle, WebViewManager};

use super::badge::{BadgeCounter, BadgeMode};
use super::lifecycle::{LifecycleController, LifecyclePolicy};
use super::single_instance::InstanceGuard;
use super::window_state::{JsonFileState, NullState, WindowStateProvider};

/// What a window is for; decides close semantics and event routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRole {
    /// The wrapped site's window. Closing it follows the lifecycle
    /// controller; its title drives the badge.
    Main,
    /// A popup or tab. Closing it just destroys it.
    Child,
    /// A hidden `about:blank` window waiting to learn whether the page
    /// will write into it. The first finished load either promotes it to
    /// `Child` or destroys it.
    Probe,
}

/// One live window with its content area.
///
/// Field order matters: the webview borrows the window's native handle,
/// so it must drop first.
pub struct ManagedWindow {
    pub webview: WebViewHandle,
    pub window: Window,
    pub role: WindowRole,
}

/// Top-level application state.
pub struct ShellApp {
    pub(super) config: AppConfig,
    /// Where the config came from; `maximize` is cleared here after its
    /// first application.
    pub(super) config_path: Option<PathBuf>,
    pub(super) platform: Platform,

    pub(super) manager: WebViewManager,
    pub(super) windows: HashMap<WindowToken, ManagedWindow>,
    pub(super) ids: HashMap<WindowId, WindowToken>,
    pub(super) main_token: Option<WindowToken>,
    /// Token of the window that currently has keyboard focus, tracked
    /// explicitly from focus events rather than asked of the OS.
    pub(super) focused: Option<WindowToken>,

    pub(super) lifecycle: LifecycleController,
    pub(super) badge: BadgeCounter,
    pub(super) badge_sink: Box<dyn BadgeSink>,
    pub(super) window_state: Box<dyn WindowStateProvider>,

    // Modifier tracking (winit sends these separately)
    pub(super) modifiers: winit::keyboard::ModifiersState,

    pub(super) instance: Option<InstanceGuard>,
    pub(super) exiting: bool,
}

impl ShellApp {
    pub fn new(
        config: AppConfig,
        config_path: Option<PathBuf>,
        instance: Option<InstanceGuard>,
    ) -> Self {
        let platform = Platform::current();

        // Validation already proved the pattern compiles; a failure here
        // means the config changed underneath us, so fall back to domain
        // matching rather than aborting.
        let override_pattern = config.internal_urls.as_deref().and_then(|p| {
            Regex::new(p)
                .map_err(|e| warn!("ignoring internal_urls pattern: {e}"))
                .ok()
        });

        let manager = WebViewManager::new(NavigationRules {
            reference_url: config.target_url.clone(),
            override_pattern,
            native_tabs_supported: platform.native_tabs_supported(),
            block_external_urls: config.block_external_urls,
        });

        let lifecycle = LifecycleController::new(LifecyclePolicy {
            dock_platform: platform.has_dock(),
            native_tabs: platform.native_tabs_supported(),
            fast_quit: config.fast_quit,
            tray_present: config.tray.enabled(),
            clear_cache_on_close: config.clear_cache,
        });

        let badge_mode = if config.counter {
            BadgeMode::Counter
        } else {
            BadgeMode::Notification
        };
        let badge = BadgeCounter::new(badge_mode, config.bounce);

        let window_state: Box<dyn WindowStateProvider> = match sitewrap_platform::paths::ensure_dirs()
            .and_then(|()| sitewrap_platform::paths::window_state_file())
        {
            Ok(path) => Box::new(JsonFileState::new(path)),
            Err(e) => {
                warn!("data directory unavailable, window state not persisted: {e}");
                Box::new(NullState)
            }
        };

        Self {
            config,
            config_path,
            platform,
            manager,
            windows: HashMap::new(),
            ids: HashMap::new(),
            main_token: None,
            focused: None,
            lifecycle,
            badge,
            badge_sink: dock_badge(),
            window_state,
            modifiers: winit::keyboard::ModifiersState::empty(),
            instance,
            exiting: false,
        }
    }

    pub(super) fn is_main(&self, token: WindowToken) -> bool {
        self.main_token == Some(token)
    }

    /// The window keyboard input should act on: the focused one, falling
    /// back to the main window.
    pub(super) fn target_token(&self) -> Option<WindowToken> {
        self.focused.or(self.main_token)
    }
}
