//! Disposition resolution for navigation and new-window requests.
//!
//! Pure classification: given a candidate URL, the host's disposition
//! hint, and the policy inputs, produce a [`DispositionDecision`]. Side
//! effects (creating windows, opening the OS browser, showing dialogs)
//! are entirely the caller's responsibility.

use regex::Regex;

use crate::policy::is_internal;

/// The host platform's hint about how a "new window" request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestedDisposition {
    /// A plain window.open / target=_blank style request.
    #[default]
    NewWindow,
    /// Middle-click / cmd-click style request.
    BackgroundTab,
    /// Shift-click style request.
    ForegroundTab,
    /// Anything the host reports that we do not recognize.
    Other,
}

/// What to do with a navigation or new-window request.
///
/// Transient value, produced per event and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispositionDecision {
    /// Follow the link in the requesting window.
    NavigateCurrent,
    /// Open a native tab without stealing focus.
    OpenBackgroundTab,
    /// Open a native tab and focus it.
    OpenForegroundTab,
    /// Open a full secondary window.
    OpenNewWindow,
    /// Hand the URL to the OS default browser; no app window involved.
    OpenExternal,
    /// Cancel outright; the caller surfaces this to the user.
    Block,
    /// Open a hidden throwaway window and promote or discard it once it
    /// either redirects away from about:blank or stops loading.
    ProbeWindow,
}

/// Resolve a "new window requested" event. Checked in order, first match
/// wins:
///
/// 1. `about:blank` probes, regardless of anything else.
/// 2. External + blocking enabled → block.
/// 3. External otherwise → OS browser.
/// 4. Internal background-tab request with native tabs → background tab.
/// 5. Internal foreground-tab/new-window request with native tabs →
///    foreground tab.
/// 6. Internal without native tabs → new window. Dispositions we do not
///    recognize land here too, as the safe default.
pub fn resolve_new_window(
    candidate: &str,
    requested: RequestedDisposition,
    reference: &str,
    override_pattern: Option<&Regex>,
    native_tabs_supported: bool,
    block_external_urls: bool,
) -> DispositionDecision {
    if candidate == "about:blank" {
        return DispositionDecision::ProbeWindow;
    }

    if !is_internal(reference, candidate, override_pattern) {
        return if block_external_urls {
            DispositionDecision::Block
        } else {
            DispositionDecision::OpenExternal
        };
    }

    if native_tabs_supported {
        return match requested {
            RequestedDisposition::BackgroundTab => DispositionDecision::OpenBackgroundTab,
            RequestedDisposition::ForegroundTab | RequestedDisposition::NewWindow => {
                DispositionDecision::OpenForegroundTab
            }
            RequestedDisposition::Other => DispositionDecision::OpenNewWindow,
        };
    }

    DispositionDecision::OpenNewWindow
}

/// Resolve an in-place navigation attempt: internal navigations proceed
/// in the current window, external ones are blocked or handed off.
pub fn resolve_navigation(
    candidate: &str,
    reference: &str,
    override_pattern: Option<&Regex>,
    block_external_urls: bool,
) -> DispositionDecision {
    if is_internal(reference, candidate, override_pattern) {
        DispositionDecision::NavigateCurrent
    } else if block_external_urls {
        DispositionDecision::Block
    } else {
        DispositionDecision::OpenExternal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "https://medium.com/";
    const INTERNAL: &str = "https://medium.com/topic/technology";
    const EXTERNAL: &str = "https://www.wikipedia.org/wiki/Main_Page";

    fn resolve(
        candidate: &str,
        requested: RequestedDisposition,
        native_tabs: bool,
        block: bool,
    ) -> DispositionDecision {
        resolve_new_window(candidate, requested, REFERENCE, None, native_tabs, block)
    }

    #[test]
    fn external_with_blocking_blocks() {
        for native_tabs in [false, true] {
            let decision = resolve(EXTERNAL, RequestedDisposition::NewWindow, native_tabs, true);
            assert_eq!(decision, DispositionDecision::Block);
            assert_ne!(decision, DispositionDecision::OpenExternal);
        }
    }

    #[test]
    fn external_without_blocking_opens_os_browser() {
        for native_tabs in [false, true] {
            assert_eq!(
                resolve(EXTERNAL, RequestedDisposition::NewWindow, native_tabs, false),
                DispositionDecision::OpenExternal
            );
        }
    }

    #[test]
    fn internal_background_tab_with_native_tabs() {
        assert_eq!(
            resolve(INTERNAL, RequestedDisposition::BackgroundTab, true, false),
            DispositionDecision::OpenBackgroundTab
        );
    }

    #[test]
    fn internal_foreground_requests_with_native_tabs() {
        assert_eq!(
            resolve(INTERNAL, RequestedDisposition::ForegroundTab, true, false),
            DispositionDecision::OpenForegroundTab
        );
        assert_eq!(
            resolve(INTERNAL, RequestedDisposition::NewWindow, true, false),
            DispositionDecision::OpenForegroundTab
        );
    }

    #[test]
    fn internal_without_native_tabs_opens_window() {
        for requested in [
            RequestedDisposition::NewWindow,
            RequestedDisposition::BackgroundTab,
            RequestedDisposition::ForegroundTab,
        ] {
            assert_eq!(
                resolve(INTERNAL, requested, false, false),
                DispositionDecision::OpenNewWindow
            );
        }
    }

    #[test]
    fn unrecognized_disposition_defaults_to_new_window() {
        assert_eq!(
            resolve(INTERNAL, RequestedDisposition::Other, true, false),
            DispositionDecision::OpenNewWindow
        );
        assert_eq!(
            resolve(INTERNAL, RequestedDisposition::Other, false, false),
            DispositionDecision::OpenNewWindow
        );
    }

    #[test]
    fn about_blank_probes_regardless_of_everything() {
        for native_tabs in [false, true] {
            for block in [false, true] {
                assert_eq!(
                    resolve("about:blank", RequestedDisposition::NewWindow, native_tabs, block),
                    DispositionDecision::ProbeWindow
                );
            }
        }
    }

    #[test]
    fn wildcard_override_keeps_cross_domain_requests_inside() {
        let wildcard = Regex::new(".*").unwrap();
        assert_eq!(
            resolve_new_window(
                EXTERNAL,
                RequestedDisposition::NewWindow,
                REFERENCE,
                Some(&wildcard),
                false,
                true,
            ),
            DispositionDecision::OpenNewWindow
        );
    }

    #[test]
    fn navigation_internal_stays_in_place() {
        assert_eq!(
            resolve_navigation(INTERNAL, REFERENCE, None, false),
            DispositionDecision::NavigateCurrent
        );
    }

    #[test]
    fn navigation_external_blocks_or_hands_off() {
        assert_eq!(
            resolve_navigation(EXTERNAL, REFERENCE, None, true),
            DispositionDecision::Block
        );
        assert_eq!(
            resolve_navigation(EXTERNAL, REFERENCE, None, false),
            DispositionDecision::OpenExternal
        );
    }

    #[test]
    fn navigation_malformed_candidate_is_external() {
        assert_eq!(
            resolve_navigation("::::", REFERENCE, None, false),
            DispositionDecision::OpenExternal
        );
    }
}
