//! Notification Clicks
//!
//! Decides what a click on a worker notification does. The notification
//! itself is always closed first by the caller.

use pwa_shared::{ACTION_CLOSE, ACTION_OPEN};

/// A window client as reported by `clients.matchAll()`
#[derive(Debug, Clone, PartialEq)]
pub struct ClientInfo {
    pub id: String,
    pub url: String,
    /// Window clients can be focused, workers cannot
    pub focusable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickAction {
    OpenWindow(String),
    /// Focus the client with this id
    Focus(String),
    Dismiss,
}

/// `open` always opens a new window, `close` only dismisses, anything else
/// focuses an app window inside `scope` or opens one.
pub fn notification_click(action: &str, clients: &[ClientInfo], scope: &str, app_url: &str) -> ClickAction {
    match action {
        ACTION_OPEN => ClickAction::OpenWindow(app_url.to_string()),
        ACTION_CLOSE => ClickAction::Dismiss,
        _ => clients
            .iter()
            .find(|c| c.focusable && c.url.starts_with(scope))
            .map(|c| ClickAction::Focus(c.id.clone()))
            .unwrap_or_else(|| ClickAction::OpenWindow(app_url.to_string())),
    }
}
