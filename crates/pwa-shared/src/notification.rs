//! Notification Payloads
//!
//! Title + options pairs handed to `new Notification(..)` on the page or
//! `registration.showNotification(..)` in the worker. Field names follow the
//! platform's NotificationOptions dictionary so the options serialize
//! straight into it.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

pub const ACTION_OPEN: &str = "open";
pub const ACTION_CLOSE: &str = "close";
pub const DEFAULT_PUSH_BODY: &str = "New message received!";

/// Characters escaped inside `data:image/svg+xml,` URIs
const SVG_URI_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>');

const GREEN: &str = "#4CAF50";
const ORANGE: &str = "#FF9800";
const BLUE: &str = "#2196F3";

fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml,{}", utf8_percent_encode(svg, SVG_URI_SET))
}

/// Round coloured badge with a glyph in the middle
pub fn badge_icon(fill: &str, glyph: &str) -> String {
    svg_data_uri(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><circle cx="50" cy="50" r="40" fill="{}"/><text x="50" y="60" font-size="40" text-anchor="middle" fill="white">{}</text></svg>"#,
        fill, glyph
    ))
}

/// Bare glyph, used for action buttons
pub fn glyph_icon(glyph: &str) -> String {
    svg_data_uri(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><text x="50" y="60" font-size="40" text-anchor="middle">{}</text></svg>"#,
        glyph
    ))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub require_interaction: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vibrate: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSpec {
    pub title: String,
    pub options: NotificationOptions,
}

impl NotificationSpec {
    /// Confirmation fired after a to-do is added
    pub fn todo_added(text: &str) -> Self {
        Self {
            title: "📝 New item added".to_string(),
            options: NotificationOptions {
                body: text.to_string(),
                icon: badge_icon(GREEN, "📝"),
                tag: Some("todo-added".to_string()),
                ..Default::default()
            },
        }
    }

    /// Manual test notification; `sent_at` is a display time string
    pub fn test(sent_at: &str) -> Self {
        Self {
            title: "🚀 Test Notification".to_string(),
            options: NotificationOptions {
                body: format!("Sent at: {}", sent_at),
                icon: badge_icon(ORANGE, "🚀"),
                tag: Some("test-notification".to_string()),
                require_interaction: false,
                ..Default::default()
            },
        }
    }

    /// Fired once the app has been installed to the home screen
    pub fn installed() -> Self {
        Self {
            title: "🎉 App installed!".to_string(),
            options: NotificationOptions {
                body: "You can now use the app offline".to_string(),
                icon: badge_icon(GREEN, "🎉"),
                ..Default::default()
            },
        }
    }

    /// Worker notification for a push message. A missing or blank payload
    /// falls back to the default body.
    pub fn push(payload: Option<&str>) -> Self {
        let body = match payload {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => DEFAULT_PUSH_BODY.to_string(),
        };
        Self {
            title: "PWA Push Notification".to_string(),
            options: NotificationOptions {
                body,
                icon: badge_icon(BLUE, "🔔"),
                badge: Some(badge_icon(BLUE, "📱")),
                tag: Some("pwa-push".to_string()),
                require_interaction: true,
                actions: vec![
                    NotificationAction {
                        action: ACTION_OPEN.to_string(),
                        title: "Open App".to_string(),
                        icon: glyph_icon("👁️"),
                    },
                    NotificationAction {
                        action: ACTION_CLOSE.to_string(),
                        title: "Close".to_string(),
                        icon: glyph_icon("❌"),
                    },
                ],
                vibrate: vec![200, 100, 200],
            },
        }
    }
}
