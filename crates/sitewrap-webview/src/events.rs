//! Events emitted by managed WebViews.
//!
//! Handlers registered on the WebView push these into a shared sink; the
//! shell drains the sink once per event-loop turn. For a given window,
//! `PageLoad { Started }` always precedes `PageLoad { Finished }` for the
//! same load.

use sitewrap_common::WindowToken;
use sitewrap_nav::DispositionDecision;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by a WebView instance, keyed by window token.
#[derive(Debug, Clone)]
pub enum WebViewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad {
        token: WindowToken,
        state: PageLoadState,
        url: String,
    },
    /// Document title changed.
    TitleChanged { token: WindowToken, title: String },
    /// An in-place navigation was cancelled by policy. When `blocked` the
    /// shell surfaces a dialog; otherwise it hands the URL to the OS
    /// browser.
    NavigationRejected {
        token: WindowToken,
        url: String,
        blocked: bool,
    },
    /// A new-window request was classified; the shell enacts the decision.
    NewWindowRequested {
        token: WindowToken,
        url: String,
        decision: DispositionDecision,
    },
    /// The page posted a notification through the bridge while possibly
    /// unfocused.
    Notification { token: WindowToken },
    /// The user clicked a notification; the main window should surface.
    NotificationClicked { token: WindowToken },
}
