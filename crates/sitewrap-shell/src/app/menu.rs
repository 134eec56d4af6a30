//! Keyboard shortcuts.
//!
//! The shell has no menu bar of its own; the actions a wrapped app needs
//! are bound to the platform's usual accelerator keys (Cmd on macOS, Ctrl
//! elsewhere) and dispatched through [`MenuAction`].

use winit::keyboard::{Key, NamedKey};

/// An action the user can trigger from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Quit,
    ZoomIn,
    ZoomOut,
    /// Restore the config's build-time zoom, not 1.0.
    ZoomReset,
    GoBack,
    GoForward,
    CopyCurrentUrl,
    ClearAppData,
    NewTab,
}

/// Map a key press to an action. `modifier` is Cmd on macOS and Ctrl
/// elsewhere; without it nothing matches.
pub fn action_for_key(modifier: bool, key: &Key) -> Option<MenuAction> {
    if !modifier {
        return None;
    }

    match key {
        Key::Character(c) => match c.as_str() {
            "q" => Some(MenuAction::Quit),
            "+" | "=" => Some(MenuAction::ZoomIn),
            "-" => Some(MenuAction::ZoomOut),
            "0" => Some(MenuAction::ZoomReset),
            "[" => Some(MenuAction::GoBack),
            "]" => Some(MenuAction::GoForward),
            "l" => Some(MenuAction::CopyCurrentUrl),
            "t" => Some(MenuAction::NewTab),
            _ => None,
        },
        Key::Named(NamedKey::Delete) => Some(MenuAction::ClearAppData),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chr(s: &str) -> Key {
        Key::Character(s.into())
    }

    #[test]
    fn modifier_is_required() {
        assert_eq!(action_for_key(false, &chr("q")), None);
        assert_eq!(action_for_key(true, &chr("q")), Some(MenuAction::Quit));
    }

    #[test]
    fn zoom_bindings() {
        assert_eq!(action_for_key(true, &chr("+")), Some(MenuAction::ZoomIn));
        // The unshifted key on most layouts.
        assert_eq!(action_for_key(true, &chr("=")), Some(MenuAction::ZoomIn));
        assert_eq!(action_for_key(true, &chr("-")), Some(MenuAction::ZoomOut));
        assert_eq!(action_for_key(true, &chr("0")), Some(MenuAction::ZoomReset));
    }

    #[test]
    fn history_bindings() {
        assert_eq!(action_for_key(true, &chr("[")), Some(MenuAction::GoBack));
        assert_eq!(action_for_key(true, &chr("]")), Some(MenuAction::GoForward));
    }

    #[test]
    fn misc_bindings() {
        assert_eq!(
            action_for_key(true, &chr("l")),
            Some(MenuAction::CopyCurrentUrl)
        );
        assert_eq!(action_for_key(true, &chr("t")), Some(MenuAction::NewTab));
        assert_eq!(
            action_for_key(true, &Key::Named(NamedKey::Delete)),
            Some(MenuAction::ClearAppData)
        );
    }

    #[test]
    fn unbound_keys_do_nothing() {
        assert_eq!(action_for_key(true, &chr("x")), None);
        assert_eq!(action_for_key(true, &Key::Named(NamedKey::Escape)), None);
    }
}
