//! Handle to one window's content area.

use tracing::{debug, warn};
use wry::WebView;

use sitewrap_common::WindowToken;

use crate::ipc;

/// CSS-injection gate for one window. Armed when a load starts, consumed
/// by the matching finished load, so a redirect chain (several starts, one
/// final finish) injects exactly once.
#[derive(Debug, Default)]
struct InjectionGate {
    armed: bool,
}

impl InjectionGate {
    fn arm(&mut self) {
        self.armed = true;
    }

    fn take(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }
}

/// Zoom bookkeeping for one window. Remembers the factor the window was
/// built with so a reset lands exactly there, however many steps were
/// applied in between.
#[derive(Debug, Clone, Copy)]
struct ZoomState {
    base: f64,
    factor: f64,
}

impl ZoomState {
    fn new(base: f64) -> Self {
        Self {
            base,
            factor: base,
        }
    }

    fn factor(&self) -> f64 {
        self.factor
    }

    fn step(&mut self, delta: f64) -> f64 {
        self.factor += delta;
        self.factor
    }

    fn reset(&mut self) -> f64 {
        self.factor = self.base;
        self.factor
    }
}

/// Wraps the underlying WebView together with the per-window state the
/// orchestrator needs: best-effort URL/title tracking, the current zoom
/// factor, and the CSS-injection gate.
pub struct WebViewHandle {
    webview: WebView,
    token: WindowToken,
    current_url: String,
    current_title: String,
    zoom: ZoomState,
    injection: InjectionGate,
}

impl WebViewHandle {
    pub(crate) fn new(webview: WebView, token: WindowToken, url: String, zoom: f64) -> Self {
        Self {
            webview,
            token,
            current_url: url,
            current_title: String::new(),
            zoom: ZoomState::new(zoom),
            injection: InjectionGate::default(),
        }
    }

    pub fn token(&self) -> WindowToken {
        self.token
    }

    /// Last URL observed through load events.
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    pub fn note_url(&mut self, url: &str) {
        self.current_url = url.to_string();
    }

    pub fn note_title(&mut self, title: &str) {
        self.current_title = title.to_string();
    }

    /// Navigate to a URL.
    pub fn load_url(&mut self, url: &str) -> Result<(), wry::Error> {
        self.current_url = url.to_string();
        self.webview.load_url(url)
    }

    /// Current zoom factor.
    pub fn zoom_factor(&self) -> f64 {
        self.zoom.factor()
    }

    /// Adjust zoom by a step (positive or negative).
    pub fn adjust_zoom(&mut self, step: f64) {
        let factor = self.zoom.step(step);
        self.apply_zoom(factor);
    }

    /// Restore exactly the zoom factor the window was built with.
    pub fn reset_zoom(&mut self) {
        let factor = self.zoom.reset();
        self.apply_zoom(factor);
    }

    fn apply_zoom(&self, factor: f64) {
        if let Err(e) = self.webview.zoom(factor) {
            warn!(token = %self.token, "zoom failed: {e}");
        }
    }

    /// Native history back. wry exposes no history API, so this rides the
    /// page's own history object.
    pub fn go_back(&self) {
        self.run_script("history.back();");
    }

    /// Native history forward.
    pub fn go_forward(&self) {
        self.run_script("history.forward();");
    }

    /// Arm CSS injection for the load that just started.
    pub fn arm_injection(&mut self) {
        self.injection.arm();
    }

    /// Consume the arming flag; returns whether injection should run now.
    pub fn take_injection(&mut self) -> bool {
        self.injection.take()
    }

    /// Install the configured CSS into the current page.
    pub fn inject_css(&self, css: &str) {
        self.run_script(&ipc::css_injection_script(css));
    }

    /// Re-enable pinch zoom, disabled by default on each load.
    pub fn restore_visual_zoom(&self) {
        self.run_script(ipc::RESTORE_VISUAL_ZOOM_SCRIPT);
    }

    /// Push the config payload to in-page scripts.
    pub fn push_config(&self, payload_json: &str) {
        self.run_script(&ipc::js_dispatch_message("params", payload_json));
    }

    /// Clear session storage and the HTTP cache. Fire-and-forget: failures
    /// are logged and never propagate to the caller.
    pub fn clear_browsing_data(&self) {
        match self.webview.clear_all_browsing_data() {
            Ok(()) => debug!(token = %self.token, "browsing data cleared"),
            Err(e) => warn!(token = %self.token, "clearing browsing data failed: {e}"),
        }
    }

    /// Evaluate JavaScript, logging failures. Script errors degrade one
    /// feature of one window, never the shell.
    pub fn run_script(&self, js: &str) {
        if let Err(e) = self.webview.evaluate_script(js) {
            warn!(token = %self.token, "script evaluation failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_chain_injects_once() {
        let mut gate = InjectionGate::default();
        // Each hop of a redirect chain starts a load; only the last one
        // finishes, and only that finish injects.
        gate.arm();
        gate.arm();
        assert!(gate.take());
        assert!(!gate.take());
    }

    #[test]
    fn gate_rearms_for_the_next_navigation() {
        let mut gate = InjectionGate::default();
        gate.arm();
        assert!(gate.take());
        gate.arm();
        assert!(gate.take());
    }

    #[test]
    fn zoom_reset_restores_built_factor_exactly() {
        let mut zoom = ZoomState::new(1.25);
        zoom.step(0.1);
        zoom.step(0.1);
        zoom.step(-0.1);
        assert_ne!(zoom.factor(), 1.25);
        assert_eq!(zoom.reset(), 1.25);
        assert_eq!(zoom.factor(), 1.25);
    }

    #[test]
    fn zoom_steps_accumulate() {
        let mut zoom = ZoomState::new(1.0);
        assert!((zoom.step(0.1) - 1.1).abs() < 1e-9);
        assert!((zoom.step(0.1) - 1.2).abs() < 1e-9);
        assert!((zoom.step(-0.1) - 1.1).abs() < 1e-9);
    }
}
