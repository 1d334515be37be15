use tracing::warn;

/// Blocking browser alert.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Log a failed action and tell the user about it.
pub fn report(action: &str, err: impl std::fmt::Display) {
    let message = err.to_string();
    warn!(action, error = %message, "action failed");
    alert(&message);
}
