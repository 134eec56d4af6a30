//! Blocking user dialogs.
//!
//! Both dialogs run on the UI thread and return before the caller
//! continues; neither can fail in a way the shell needs to recover from.

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

const CLEAR_CONFIRM_LABEL: &str = "Clear data";
const CLEAR_CANCEL_LABEL: &str = "Cancel";

/// Ask before wiping cookies, local storage and caches.
///
/// Returns true only on the explicit confirm choice; closing the dialog
/// counts as cancel (the safe default).
pub fn confirm_clear_app_data() -> bool {
    let result = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Clear app data")
        .set_description(
            "This will clear all data (cookies, local storage, caches) from this app. \
             Are you sure you want to proceed?",
        )
        .set_buttons(MessageButtons::OkCancelCustom(
            CLEAR_CONFIRM_LABEL.to_string(),
            CLEAR_CANCEL_LABEL.to_string(),
        ))
        .show();

    matches!(result, MessageDialogResult::Custom(label) if label == CLEAR_CONFIRM_LABEL)
}

/// Tell the user a navigation was blocked, naming the URL.
pub fn blocked_url_notice(url: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Navigation blocked")
        .set_description(format!("Cannot navigate to external URL: {url}"))
        .set_buttons(MessageButtons::Ok)
        .show();
}
