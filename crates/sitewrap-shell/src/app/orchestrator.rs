//! Window orchestration.
//!
//! Creates windows (main, child, tab, probe), enacts navigation
//! decisions, routes webview events, and carries out close sequences.
//! Every content area is built through the shared [`WebViewManager`], so
//! feature propagation (user agent, proxy, zoom, CSS, config push) is
//! uniform across window kinds.

use std::fs::File;
use std::path::Path;

use tracing::{debug, error, info, warn};
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Icon, Window, WindowAttributes, WindowLevel};

use sitewrap_common::{next_token, ShellError, WindowToken};
use sitewrap_config::{config_to_json, save_config_to_path, TrayMode};
use sitewrap_nav::DispositionDecision;
use sitewrap_platform::dialogs;
use sitewrap_webview::{PageLoadState, ProxyEndpoint, WebViewEvent, WebViewHandle, WebViewOptions};

use super::core::{ManagedWindow, ShellApp, WindowRole};
use super::lifecycle::{CloseStep, LifecycleState};
use super::menu::MenuAction;
use super::tabs;
use super::window_state::WindowBounds;

/// Zoom change per keyboard step.
pub(super) const ZOOM_STEP: f64 = 0.1;

/// What the first finished load of a hidden probe window means for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ProbeOutcome {
    /// The page wrote into the window; show it as a regular child.
    Promote,
    /// The window is still blank; it will never show content.
    Discard,
}

/// Judge a probe window by the URL of its first finished load.
pub(super) fn probe_outcome(url: &str) -> ProbeOutcome {
    if url == "about:blank" {
        ProbeOutcome::Discard
    } else {
        ProbeOutcome::Promote
    }
}

impl ShellApp {
    fn webview_options(&self, url: &str) -> WebViewOptions {
        WebViewOptions {
            url: url.to_string(),
            user_agent: self.config.user_agent.clone(),
            zoom: self.config.zoom,
            proxy: self
                .config
                .proxy_rules
                .as_deref()
                .and_then(ProxyEndpoint::parse),
            inject_css: self.config.inject_css.clone(),
            config_payload: config_to_json(&self.config),
            devtools: cfg!(debug_assertions),
        }
    }

    fn base_attributes(&self, visible: bool) -> WindowAttributes {
        let mut attrs = Window::default_attributes()
            .with_title(&self.config.name)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_decorations(!self.config.hide_window_frame)
            .with_visible(visible);

        if self.config.always_on_top {
            attrs = attrs.with_window_level(WindowLevel::AlwaysOnTop);
        }
        if self.config.min_width.is_some() || self.config.min_height.is_some() {
            attrs = attrs.with_min_inner_size(LogicalSize::new(
                self.config.min_width.unwrap_or(0),
                self.config.min_height.unwrap_or(0),
            ));
        }
        if self.config.max_width.is_some() || self.config.max_height.is_some() {
            attrs = attrs.with_max_inner_size(LogicalSize::new(
                self.config.max_width.unwrap_or(u32::MAX),
                self.config.max_height.unwrap_or(u32::MAX),
            ));
        }
        attrs
    }

    /// Create the main window and its content area. Returns false when
    /// window or webview creation fails, which is fatal for the shell.
    pub(super) fn create_main_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let start_hidden = self.config.tray == TrayMode::StartInTray;
        let mut attrs = self
            .base_attributes(!start_hidden)
            .with_window_icon(load_icon());

        // Saved bounds from the last run win over the config's defaults.
        if let Some(bounds) = self.window_state.bounds() {
            attrs = attrs
                .with_inner_size(PhysicalSize::new(bounds.width, bounds.height))
                .with_position(PhysicalPosition::new(bounds.x, bounds.y));
        } else if let (Some(x), Some(y)) = (self.config.x, self.config.y) {
            attrs = attrs.with_position(PhysicalPosition::new(x, y));
        }

        if self.config.full_screen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = match event_loop.create_window(attrs) {
            Ok(window) => window,
            Err(e) => {
                error!("creating main window failed: {e}");
                return false;
            }
        };
        tabs::prepare_for_tabbing(&window);

        let token = next_token();
        let target_url = self.config.target_url.clone();
        let options = self.webview_options(&target_url);
        let webview = match self.manager.create(token, &window, &options) {
            Ok(webview) => webview,
            Err(e) => {
                error!("creating main webview failed: {e}");
                return false;
            }
        };

        if self.config.clear_cache {
            webview.clear_browsing_data();
        }
        if start_hidden {
            self.lifecycle.note_start_hidden();
        }
        self.apply_maximize_once(&window);

        info!(%token, url = %self.config.target_url, "main window created");
        self.ids.insert(window.id(), token);
        self.main_token = Some(token);
        self.windows.insert(
            token,
            ManagedWindow {
                webview,
                window,
                role: WindowRole::Main,
            },
        );
        true
    }

    /// Create a popup-style window.
    pub(super) fn create_child_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        url: &str,
        visible: bool,
        role: WindowRole,
    ) -> Option<WindowToken> {
        let attrs = self.base_attributes(visible);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => window,
            Err(e) => {
                warn!("creating child window failed: {e}");
                return None;
            }
        };
        tabs::prepare_for_tabbing(&window);

        let token = next_token();
        let options = self.webview_options(url);
        let webview = match self.manager.create(token, &window, &options) {
            Ok(webview) => webview,
            Err(e) => {
                warn!("creating child webview failed: {e}");
                return None;
            }
        };

        debug!(%token, url, ?role, "child window created");
        self.ids.insert(window.id(), token);
        if visible {
            window.focus_window();
        }
        self.windows.insert(
            token,
            ManagedWindow {
                webview,
                window,
                role,
            },
        );
        Some(token)
    }

    /// Open `url` as a native tab in the originating window's tab group.
    /// A background tab hands focus straight back to the originator.
    pub(super) fn create_tab(
        &mut self,
        event_loop: &ActiveEventLoop,
        origin: WindowToken,
        url: &str,
        foreground: bool,
    ) {
        let Some(token) = self.create_child_window(event_loop, url, true, WindowRole::Child)
        else {
            return;
        };

        let (Some(origin_win), Some(tab_win)) =
            (self.windows.get(&origin), self.windows.get(&token))
        else {
            return;
        };
        tabs::add_tab(&origin_win.window, &tab_win.window, foreground);
        if !foreground {
            origin_win.window.focus_window();
        }
    }

    /// Hidden window for a `window.open()` with no URL. The page either
    /// writes into it (we show it on the first finished load) or leaves
    /// it blank (we destroy it).
    pub(super) fn create_probe_window(&mut self, event_loop: &ActiveEventLoop) {
        self.create_child_window(event_loop, "about:blank", false, WindowRole::Probe);
    }

    /// Enact a resolved new-window decision.
    pub(super) fn enact_decision(
        &mut self,
        event_loop: &ActiveEventLoop,
        origin: WindowToken,
        url: &str,
        decision: DispositionDecision,
    ) {
        match decision {
            DispositionDecision::NavigateCurrent => {
                if let Some(mw) = self.windows.get_mut(&origin) {
                    if let Err(e) = mw.webview.load_url(url) {
                        warn!(%origin, url, "navigation failed: {e}");
                    }
                }
            }
            DispositionDecision::OpenBackgroundTab => {
                self.create_tab(event_loop, origin, url, false);
            }
            DispositionDecision::OpenForegroundTab => {
                self.create_tab(event_loop, origin, url, true);
            }
            DispositionDecision::OpenNewWindow => {
                self.create_child_window(event_loop, url, true, WindowRole::Child);
            }
            DispositionDecision::OpenExternal => open_external(url),
            DispositionDecision::Block => dialogs::blocked_url_notice(url),
            DispositionDecision::ProbeWindow => self.create_probe_window(event_loop),
        }
    }

    /// Route one drained webview event.
    pub(super) fn process_webview_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        event: WebViewEvent,
    ) {
        match event {
            WebViewEvent::PageLoad { token, state, url } => {
                self.on_page_load(token, state, &url);
            }
            WebViewEvent::TitleChanged { token, title } => {
                if let Some(mw) = self.windows.get_mut(&token) {
                    mw.webview.note_title(&title);
                    mw.window.set_title(&title);
                }
                if self.is_main(token) {
                    self.badge.on_title_changed(&title, self.badge_sink.as_ref());
                }
            }
            WebViewEvent::NavigationRejected {
                token,
                url,
                blocked,
            } => {
                debug!(%token, url, blocked, "navigation rejected");
                if blocked {
                    dialogs::blocked_url_notice(&url);
                } else {
                    open_external(&url);
                }
            }
            WebViewEvent::NewWindowRequested {
                token,
                url,
                decision,
            } => {
                self.enact_decision(event_loop, token, &url, decision);
            }
            WebViewEvent::Notification { token } => {
                let focused = self.focused == Some(token);
                self.badge.on_notification(focused, self.badge_sink.as_ref());
            }
            WebViewEvent::NotificationClicked { .. } => {
                self.show_main_window();
            }
        }
    }

    fn on_page_load(&mut self, token: WindowToken, state: PageLoadState, url: &str) {
        let Some(mw) = self.windows.get_mut(&token) else {
            return;
        };

        match state {
            PageLoadState::Started => {
                mw.webview.note_url(url);
                mw.webview.arm_injection();
            }
            PageLoadState::Finished => {
                mw.webview.note_url(url);
                if mw.webview.take_injection() {
                    if let Some(css) = &self.config.inject_css {
                        mw.webview.inject_css(css);
                    }
                }
                mw.webview.restore_visual_zoom();
                mw.webview.push_config(&config_to_json(&self.config));

                let mut discard_probe = false;
                if mw.role == WindowRole::Probe {
                    match probe_outcome(url) {
                        ProbeOutcome::Discard => {
                            debug!(%token, "probe window stayed blank, discarding");
                            discard_probe = true;
                        }
                        ProbeOutcome::Promote => {
                            debug!(%token, url, "probe window navigated, showing");
                            mw.role = WindowRole::Child;
                            mw.window.set_visible(true);
                            mw.window.focus_window();
                        }
                    }
                }
                if discard_probe {
                    self.destroy_window(token);
                }
            }
        }
    }

    /// Run the lifecycle controller's close steps against the main window.
    pub(super) fn apply_close_steps(
        &mut self,
        event_loop: &ActiveEventLoop,
        token: WindowToken,
        steps: Vec<CloseStep>,
    ) {
        for step in steps {
            match step {
                CloseStep::DetachTab => {
                    if let Some(mw) = self.windows.get(&token) {
                        tabs::detach_tab(&mw.window);
                    }
                }
                CloseStep::ExitFullscreen => {
                    if let Some(mw) = self.windows.get(&token) {
                        mw.window.set_fullscreen(None);
                    }
                }
                CloseStep::ClearCache => {
                    if let Some(mw) = self.windows.get(&token) {
                        mw.webview.clear_browsing_data();
                    }
                }
                CloseStep::Hide => {
                    if let Some(mw) = self.windows.get(&token) {
                        mw.window.set_visible(false);
                    }
                }
                CloseStep::Destroy => self.destroy_window(token),
            }
        }
        self.maybe_exit(event_loop);
    }

    /// Drop a window and its content area; prunes all bookkeeping.
    pub(super) fn destroy_window(&mut self, token: WindowToken) {
        let Some(mw) = self.windows.remove(&token) else {
            return;
        };
        self.ids.remove(&mw.window.id());
        if self.focused == Some(token) {
            self.focused = None;
        }
        if self.main_token == Some(token) {
            self.main_token = None;
        }
        debug!(%token, "window destroyed");
    }

    /// Surface the main window: dock click, second instance, notification
    /// click or tray activation all land here.
    pub(super) fn show_main_window(&mut self) {
        let Some(token) = self.main_token else {
            return;
        };
        if let Some(mw) = self.windows.get(&token) {
            mw.window.set_visible(true);
            mw.window.set_minimized(false);
            mw.window.focus_window();
        }
        self.lifecycle.note_shown();
    }

    pub(super) fn handle_menu_action(
        &mut self,
        event_loop: &ActiveEventLoop,
        action: MenuAction,
    ) {
        debug!(?action, "menu action");
        match action {
            MenuAction::Quit => {
                self.exiting = true;
                event_loop.exit();
            }
            MenuAction::ZoomIn => self.with_target_webview(|wv| wv.adjust_zoom(ZOOM_STEP)),
            MenuAction::ZoomOut => self.with_target_webview(|wv| wv.adjust_zoom(-ZOOM_STEP)),
            MenuAction::ZoomReset => self.with_target_webview(|wv| wv.reset_zoom()),
            MenuAction::GoBack => self.with_target_webview(|wv| wv.go_back()),
            MenuAction::GoForward => self.with_target_webview(|wv| wv.go_forward()),
            MenuAction::CopyCurrentUrl => self.copy_current_url(),
            MenuAction::ClearAppData => self.clear_app_data(),
            MenuAction::NewTab => {
                if !self.platform.native_tabs_supported() {
                    return;
                }
                if let Some(origin) = self.target_token() {
                    let url = self.config.target_url.clone();
                    self.create_tab(event_loop, origin, &url, true);
                }
            }
        }
    }

    fn with_target_webview(&mut self, f: impl FnOnce(&mut WebViewHandle)) {
        if let Some(mw) = self.target_token().and_then(|t| self.windows.get_mut(&t)) {
            f(&mut mw.webview);
        }
    }

    fn copy_current_url(&self) {
        let Some(mw) = self.target_token().and_then(|t| self.windows.get(&t)) else {
            return;
        };
        let url = mw.webview.current_url().to_string();
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(url) {
                    warn!("copying URL to clipboard failed: {e}");
                }
            }
            Err(e) => warn!("clipboard unavailable: {e}"),
        }
    }

    /// Confirmed wipe of cookies, local storage and caches, app-wide.
    fn clear_app_data(&mut self) {
        if !dialogs::confirm_clear_app_data() {
            return;
        }
        info!("clearing app data");
        for mw in self.windows.values() {
            mw.webview.clear_browsing_data();
        }
    }

    /// Persist the main window's bounds; skipped while maximized or
    /// fullscreen so a restore never resurrects those as plain bounds.
    pub(super) fn save_main_bounds(&mut self) {
        let Some(mw) = self.main_token.and_then(|t| self.windows.get(&t)) else {
            return;
        };
        if mw.window.is_maximized() || mw.window.fullscreen().is_some() {
            return;
        }
        let Ok(position) = mw.window.outer_position() else {
            return;
        };
        let size = mw.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.window_state.manage(WindowBounds {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        });
    }

    /// `maximize` is a launch-once flag: apply it, then clear it on disk
    /// so the saved bounds govern later launches.
    fn apply_maximize_once(&mut self, window: &Window) {
        if !self.config.maximize {
            return;
        }
        window.set_maximized(true);
        self.config.maximize = false;
        if let Some(path) = self.config_path.clone() {
            if let Err(e) = save_config_to_path(&self.config, &path) {
                warn!("clearing maximize flag in config failed: {e}");
            }
        }
    }

    pub(super) fn maybe_exit(&mut self, event_loop: &ActiveEventLoop) {
        // Windows being empty before the main window exists (or while it
        // is merely hidden) must not quit; Destroyed is the tell.
        let all_closed = self.windows.is_empty()
            && self.lifecycle.state() == LifecycleState::Destroyed
            && self.lifecycle.quits_on_all_windows_closed();
        if self.exiting || all_closed {
            event_loop.exit();
        }
    }
}

/// Hand a URL to the OS default browser.
fn open_external(url: &str) {
    info!(url, "opening externally");
    if let Err(e) = open::that_detached(url) {
        warn!(url, "opening in OS browser failed: {e}");
    }
}

/// Window icon packaged beside the executable, when present and decodable.
/// `.ico` is left to the platform packager; only PNG is decoded here.
fn load_icon() -> Option<Icon> {
    let path = sitewrap_platform::paths::app_icon()?;
    if path.extension()? != "png" {
        return None;
    }
    match decode_png_icon(&path) {
        Ok(icon) => Some(icon),
        Err(e) => {
            warn!(path = %path.display(), "ignoring window icon: {e}");
            None
        }
    }
}

fn decode_png_icon(path: &Path) -> sitewrap_common::Result<Icon> {
    let decoder = png::Decoder::new(File::open(path)?);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ShellError::Window(format!("icon decode failed: {e}")))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ShellError::Window(format!("icon decode failed: {e}")))?;
    if info.color_type != png::ColorType::Rgba {
        return Err(ShellError::Window(format!(
            "expected an RGBA icon, got {:?}",
            info.color_type
        )));
    }
    buf.truncate(info.buffer_size());
    Icon::from_rgba(buf, info.width, info.height)
        .map_err(|e| ShellError::Window(format!("bad icon data: {e}")))
}
