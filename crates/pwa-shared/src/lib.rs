//! Shared PWA Types
//!
//! Configuration, notification permission and notification payloads used
//! by both the to-do page and the cache worker.

mod config;
mod notification;
mod permission;

pub use config::{AppConfig, ConfigError};
pub use notification::{
    badge_icon, glyph_icon, NotificationAction, NotificationOptions, NotificationSpec,
    ACTION_CLOSE, ACTION_OPEN, DEFAULT_PUSH_BODY,
};
pub use permission::Permission;
