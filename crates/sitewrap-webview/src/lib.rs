//! WebView integration for the sitewrap shell.
//!
//! Wraps the `wry` crate to provide:
//! - a single creation choke point through which every window's content
//!   area is built, with navigation policy and feature propagation wired
//!   before the first navigation
//! - a per-window handle (zoom, history, script evaluation, cache
//!   clearing, config push, CSS-injection arming)
//! - an event sink the shell drains once per event-loop turn

pub mod events;
pub mod handle;
pub mod ipc;
pub mod manager;
pub mod options;

pub use events::{PageLoadState, WebViewEvent};
pub use handle::WebViewHandle;
pub use manager::WebViewManager;
pub use options::{NavigationRules, ProxyEndpoint, WebViewOptions};
