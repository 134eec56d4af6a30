//! Dock badge bookkeeping.
//!
//! Counter mode derives a count from bracketed numbers in the page title
//! (the convention webmail and chat sites use, e.g. "Inbox (11) - x").
//! Notification mode sets a static dot while the window is unfocused.
//! The two modes are mutually exclusive, chosen at construction.

use std::sync::LazyLock;

use regex::Regex;

use sitewrap_platform::BadgeSink;

/// Digits, optionally with thousands separators, inside (), [] or {},
/// with an optional trailing `+`. First capture wins.
static COUNTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(\[{]([\d.,]+)\+?[}\])]").unwrap());

/// Extract the badge value from a window title.
pub fn counter_value(title: &str) -> Option<String> {
    COUNTER_RE
        .captures(title)
        .map(|caps| caps[1].to_string())
}

/// Numeric value of a captured count, separators stripped. `None` for
/// captures that are separators only (e.g. "...").
fn parse_count(value: &str) -> Option<u64> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeMode {
    /// Badge follows bracketed counts in the title.
    Counter,
    /// Badge is a static dot driven by notification events.
    Notification,
}

pub struct BadgeCounter {
    mode: BadgeMode,
    bounce: bool,
    /// Last numeric count, for the bounce-on-increase comparison.
    last_count: Option<u64>,
}

impl BadgeCounter {
    pub fn new(mode: BadgeMode, bounce: bool) -> Self {
        Self {
            mode,
            bounce,
            last_count: None,
        }
    }

    pub fn mode(&self) -> BadgeMode {
        self.mode
    }

    /// Counter mode: title changed on the main window.
    pub fn on_title_changed(&mut self, title: &str, sink: &dyn BadgeSink) {
        if self.mode != BadgeMode::Counter {
            return;
        }

        match counter_value(title) {
            Some(value) => {
                let count = parse_count(&value);
                let increased = matches!(
                    (count, self.last_count),
                    (Some(new), Some(old)) if new > old
                ) || (count.is_some() && self.last_count.is_none());
                sink.set(&value, self.bounce && increased);
                self.last_count = count;
            }
            None => {
                sink.clear();
                self.last_count = None;
            }
        }
    }

    /// Notification mode: the page posted a notification.
    pub fn on_notification(&mut self, window_focused: bool, sink: &dyn BadgeSink) {
        if self.mode != BadgeMode::Notification || window_focused {
            return;
        }
        sink.set("\u{2022}", self.bounce);
    }

    /// Notification mode: the main window gained focus.
    pub fn on_focus(&mut self, sink: &dyn BadgeSink) {
        if self.mode != BadgeMode::Notification {
            return;
        }
        sink.clear();
    }
}
