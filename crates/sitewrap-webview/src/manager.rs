//! WebView creation choke point.
//!
//! Every window's content area — main, child, tab, probe — is built here,
//! so navigation listeners and feature propagation (user agent, proxy,
//! zoom, injected CSS, config push) can never be skipped for a window.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::{WebView, WebViewBuilder};

use sitewrap_common::WindowToken;
use sitewrap_nav::{resolve_navigation, resolve_new_window, DispositionDecision, RequestedDisposition};

use crate::events::{PageLoadState, WebViewEvent};
use crate::handle::WebViewHandle;
use crate::ipc::{self, BridgeMessage, BRIDGE_INIT_SCRIPT};
use crate::options::{NavigationRules, WebViewOptions};

/// Builds and wires WebViews; owns the event sink the shell drains.
pub struct WebViewManager {
    events: Arc<Mutex<Vec<WebViewEvent>>>,
    rules: NavigationRules,
}

impl WebViewManager {
    pub fn new(rules: NavigationRules) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            rules,
        }
    }

    pub fn rules(&self) -> &NavigationRules {
        &self.rules
    }

    /// Drain all pending events, in arrival order.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        let mut events = self.events.lock().unwrap();
        std::mem::take(&mut *events)
    }

    /// Create the content area for a window.
    ///
    /// All handlers are registered before the initial navigation begins,
    /// so no window ever navigates unobserved.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        token: WindowToken,
        window: &W,
        options: &WebViewOptions,
    ) -> Result<WebViewHandle, wry::Error> {
        let mut builder = WebViewBuilder::new()
            .with_devtools(options.devtools)
            .with_initialization_script(BRIDGE_INIT_SCRIPT)
            .with_focused(false);

        if let Some(ua) = &options.user_agent {
            builder = builder.with_user_agent(ua);
        }

        if let Some(proxy) = &options.proxy {
            builder = builder.with_proxy_config(wry::ProxyConfig::Http(wry::ProxyEndpoint {
                host: proxy.host.clone(),
                port: proxy.port.clone(),
            }));
        }

        // CSS has to be present before first paint as well; the per-load
        // injection on finished loads only covers later navigations.
        if let Some(css) = &options.inject_css {
            builder = builder.with_initialization_script(&ipc::css_injection_script(css));
        }

        builder = self.attach_navigation_handler(builder, token);
        builder = self.attach_new_window_handler(builder, token);
        builder = self.attach_page_load_handler(builder, token);
        builder = self.attach_title_handler(builder, token);
        builder = self.attach_ipc_handler(builder, token);

        builder = builder.with_url(&options.url);

        let webview = builder.build(window)?;

        if let Err(e) = webview.zoom(options.zoom) {
            warn!(%token, "applying initial zoom failed: {e}");
        }

        debug!(%token, url = %options.url, "webview created");

        Ok(WebViewHandle::new(
            webview,
            token,
            options.url.clone(),
            options.zoom,
        ))
    }

    /// In-place navigations: internal ones proceed, external ones are
    /// cancelled synchronously within this dispatch and reported for the
    /// shell to hand off or surface as blocked.
    fn attach_navigation_handler<'a>(
        &self,
        builder: WebViewBuilder<'a>,
        token: WindowToken,
    ) -> WebViewBuilder<'a> {
        let events = Arc::clone(&self.events);
        let rules = self.rules.clone();
        builder.with_navigation_handler(move |url| {
            let decision = resolve_navigation(
                &url,
                &rules.reference_url,
                rules.override_pattern.as_ref(),
                rules.block_external_urls,
            );
            match decision {
                DispositionDecision::NavigateCurrent => true,
                _ => {
                    debug!(%token, url = %url, ?decision, "navigation cancelled");
                    if let Ok(mut events) = events.lock() {
                        events.push(WebViewEvent::NavigationRejected {
                            token,
                            url,
                            blocked: decision == DispositionDecision::Block,
                        });
                    }
                    false
                }
            }
        })
    }

    /// New-window requests: the native window is always cancelled and the
    /// resolved decision is pushed for the shell to enact, so even
    /// allowed popups funnel back through this manager.
    fn attach_new_window_handler<'a>(
        &self,
        builder: WebViewBuilder<'a>,
        token: WindowToken,
    ) -> WebViewBuilder<'a> {
        let events = Arc::clone(&self.events);
        let rules = self.rules.clone();
        builder.with_new_window_req_handler(move |url| {
            // wry reports no disposition hint, so requests arrive as plain
            // new-window; the resolver still owns the full mapping.
            let decision = resolve_new_window(
                &url,
                RequestedDisposition::NewWindow,
                &rules.reference_url,
                rules.override_pattern.as_ref(),
                rules.native_tabs_supported,
                rules.block_external_urls,
            );
            debug!(%token, url = %url, ?decision, "new window requested");
            if let Ok(mut events) = events.lock() {
                events.push(WebViewEvent::NewWindowRequested {
                    token,
                    url,
                    decision,
                });
            }
            false
        })
    }

    fn attach_page_load_handler<'a>(
        &self,
        builder: WebViewBuilder<'a>,
        token: WindowToken,
    ) -> WebViewBuilder<'a> {
        let events = Arc::clone(&self.events);
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(%token, ?state, url = %url, "page load");
            if let Ok(mut events) = events.lock() {
                events.push(WebViewEvent::PageLoad { token, state, url });
            }
        })
    }

    fn attach_title_handler<'a>(
        &self,
        builder: WebViewBuilder<'a>,
        token: WindowToken,
    ) -> WebViewBuilder<'a> {
        let events = Arc::clone(&self.events);
        builder.with_document_title_changed_handler(move |title| {
            if let Ok(mut events) = events.lock() {
                events.push(WebViewEvent::TitleChanged { token, title });
            }
        })
    }

    fn attach_ipc_handler<'a>(
        &self,
        builder: WebViewBuilder<'a>,
        token: WindowToken,
    ) -> WebViewBuilder<'a> {
        let events = Arc::clone(&self.events);
        builder.with_ipc_handler(move |request| {
            let Some(message) = BridgeMessage::from_json(request.body()) else {
                warn!(%token, "unparseable bridge message");
                return;
            };
            let event = match message.kind.as_str() {
                "notification" => WebViewEvent::Notification { token },
                "notification-click" => WebViewEvent::NotificationClicked { token },
                other => {
                    debug!(%token, kind = other, "ignoring bridge message");
                    return;
                }
            };
            if let Ok(mut events) = events.lock() {
                events.push(event);
            }
        })
    }

    #[cfg(test)]
    pub(crate) fn push_event(&self, event: WebViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitewrap_common::next_token;

    fn rules() -> NavigationRules {
        NavigationRules {
            reference_url: "https://medium.com/".into(),
            override_pattern: None,
            native_tabs_supported: false,
            block_external_urls: false,
        }
    }

    #[test]
    fn drain_empties_the_sink() {
        let manager = WebViewManager::new(rules());
        let token = next_token();
        manager.push_event(WebViewEvent::Notification { token });
        manager.push_event(WebViewEvent::NotificationClicked { token });

        let drained = manager.drain_events();
        assert_eq!(drained.len(), 2);
        assert!(manager.drain_events().is_empty());
    }

    #[test]
    fn drain_preserves_arrival_order() {
        let manager = WebViewManager::new(rules());
        let token = next_token();
        manager.push_event(WebViewEvent::PageLoad {
            token,
            state: PageLoadState::Started,
            url: "https://medium.com/".into(),
        });
        manager.push_event(WebViewEvent::PageLoad {
            token,
            state: PageLoadState::Finished,
            url: "https://medium.com/".into(),
        });

        let drained = manager.drain_events();
        assert!(matches!(
            drained[0],
            WebViewEvent::PageLoad {
                state: PageLoadState::Started,
                ..
            }
        ));
        assert!(matches!(
            drained[1],
            WebViewEvent::PageLoad {
                state: PageLoadState::Finished,
                ..
            }
        ));
    }
}
