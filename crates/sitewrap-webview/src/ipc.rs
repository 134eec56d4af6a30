//! Scripts injected into every page and the JS -> Rust message protocol.

use serde::{Deserialize, Serialize};

/// A message posted from the page through the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeMessage {
    /// The message type / command name.
    pub kind: String,
}

impl BridgeMessage {
    /// Parse a bridge message from the raw postMessage body.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Bridge initialization script, injected into every WebView before any
/// page script runs.
///
/// Wraps the `Notification` constructor so background notifications and
/// notification clicks reach the shell (for badge bookkeeping and window
/// surfacing), and exposes `window.sitewrap.on('params', ...)` so in-page
/// scripts can receive the config payload pushed on every load.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    window.sitewrap = window.sitewrap || {};
    window.sitewrap._handlers = {};
    window.sitewrap.on = function(kind, callback) {
        window.sitewrap._handlers[kind] = callback;
    };
    window.sitewrap._dispatch = function(kind, payload) {
        var handler = window.sitewrap._handlers[kind];
        if (handler) {
            handler(payload);
        }
    };

    if (typeof Notification === 'function') {
        var NativeNotification = Notification;
        var Wrapped = function(title, options) {
            var notification = new NativeNotification(title, options);
            window.ipc.postMessage(JSON.stringify({ kind: 'notification' }));
            notification.addEventListener('click', function() {
                window.ipc.postMessage(JSON.stringify({ kind: 'notification-click' }));
            });
            return notification;
        };
        Wrapped.permission = NativeNotification.permission;
        Wrapped.requestPermission = NativeNotification.requestPermission.bind(NativeNotification);
        window.Notification = Wrapped;
    }
})();
"#;

/// Script re-run on every finished load to restore pinch-to-zoom, which
/// embedded webviews disable by default. Must run per load, not once.
pub const RESTORE_VISUAL_ZOOM_SCRIPT: &str = r#"
(function() {
    var meta = document.querySelector('meta[name="viewport"]');
    if (!meta) {
        meta = document.createElement('meta');
        meta.name = 'viewport';
        document.head && document.head.appendChild(meta);
    }
    meta.content = 'width=device-width, initial-scale=1, minimum-scale=1, maximum-scale=3, user-scalable=yes';
})();
"#;

/// Build the script that installs the configured CSS into the current page.
pub fn css_injection_script(css: &str) -> String {
    let css_literal = serde_json::to_string(css).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
(function() {{
    var style = document.getElementById('sitewrap-injected-css');
    if (!style) {{
        style = document.createElement('style');
        style.id = 'sitewrap-injected-css';
        (document.head || document.documentElement).appendChild(style);
    }}
    style.textContent = {css_literal};
}})();
"#
    )
}

/// Build the script that dispatches a payload to in-page handlers.
pub fn js_dispatch_message(kind: &str, payload_json: &str) -> String {
    format!(
        "window.sitewrap._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_message_parses_kind() {
        let msg = BridgeMessage::from_json(r#"{"kind":"notification"}"#).unwrap();
        assert_eq!(msg.kind, "notification");
    }

    #[test]
    fn bridge_message_rejects_garbage() {
        assert!(BridgeMessage::from_json("not json").is_none());
    }

    #[test]
    fn css_script_escapes_quotes() {
        let script = css_injection_script("body { content: \"</style>\"; }");
        assert!(script.contains("\\\"</style>\\\""));
        assert!(!script.contains("textContent = body"));
    }

    #[test]
    fn dispatch_message_quotes_kind() {
        let script = js_dispatch_message("params", "{\"zoom\":1.0}");
        assert!(script.starts_with("window.sitewrap._dispatch(\"params\""));
        assert!(script.contains("{\"zoom\":1.0}"));
    }
}
