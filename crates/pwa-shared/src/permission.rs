//! Notification Permission
//!
//! Mirrors the platform's tri-state permission, plus `Unsupported` for
//! browsers without a Notification API. Never persisted by the app.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Not asked yet
    #[default]
    Default,
    Granted,
    Denied,
    /// No Notification API in this browser
    Unsupported,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Default => "default",
            Permission::Granted => "granted",
            Permission::Denied => "denied",
            Permission::Unsupported => "unsupported",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "granted" => Permission::Granted,
            "denied" => Permission::Denied,
            _ => Permission::Default,
        }
    }

    /// The browser only lets us prompt from the unset state
    pub fn should_prompt(&self) -> bool {
        matches!(self, Permission::Default)
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Permission::Granted)
    }

    /// Status line shown in the notification card
    pub fn status_text(&self) -> &'static str {
        match self {
            Permission::Default => "Click to enable notifications",
            Permission::Granted => "✅ Notifications enabled!",
            Permission::Denied => "❌ Notifications blocked",
            Permission::Unsupported => "Notifications are not supported in this browser",
        }
    }
}
