//! Application Context
//!
//! The page controller. Built once in `App`, provided via context and
//! captured by every event handler.

use chrono::Utc;
use leptos::prelude::*;
use log::{error, info, warn};
use pwa_shared::{AppConfig, NotificationSpec, Permission};

use crate::platform::{self, BrowserStorage};
use crate::repository::TodoRepository;
use crate::store::{store_set_install_available, store_set_items, store_set_online, store_set_permission, AppStore};

#[derive(Clone, Copy)]
pub struct AppContext {
    store: AppStore,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(store: AppStore, config: AppConfig) -> Self {
        Self {
            store,
            config: StoredValue::new(config),
        }
    }

    fn repository(&self) -> TodoRepository<BrowserStorage> {
        let key = self.config.with_value(|c| c.storage_key.clone());
        TodoRepository::new(BrowserStorage::open(), &key)
    }

    /// Re-read the list from storage
    pub fn reload(&self) {
        store_set_items(&self.store, self.repository().load());
    }

    /// Add an item; `false` when the text was blank or could not be stored
    pub fn add_item(&self, text: &str) -> bool {
        let item = match self.repository().add(text, Utc::now()) {
            Ok(Some(item)) => item,
            Ok(None) => return false,
            Err(e) => {
                error!("[App] Error saving todos: {}", e);
                return false;
            }
        };
        self.reload();
        if platform::notification_permission().is_granted() {
            if let Err(e) = platform::show_notification(&NotificationSpec::todo_added(&item.text)) {
                warn!("[App] Could not show notification: {}", e);
            }
        }
        true
    }

    pub fn toggle_item(&self, id: u64) {
        if self.repository().toggle(id) {
            self.reload();
        }
    }

    pub fn delete_item(&self, id: u64) {
        if self.repository().delete(id) {
            self.reload();
        }
    }

    /// Prompt only from the unset state, then show the outcome
    pub async fn enable_notifications(&self) {
        let mut permission = platform::notification_permission();
        if permission == Permission::Unsupported {
            platform::alert("This browser does not support notifications");
            store_set_permission(&self.store, permission);
            return;
        }
        if permission.should_prompt() {
            permission = match platform::request_notification_permission().await {
                Ok(p) => p,
                Err(e) => {
                    error!("[App] Permission request failed: {}", e);
                    permission
                }
            };
        }
        info!("[App] Notification permission: {}", permission.as_str());
        store_set_permission(&self.store, permission);
    }

    pub fn send_test_notification(&self) {
        if !platform::notification_permission().is_granted() {
            return;
        }
        let sent_at = chrono::Local::now().format("%H:%M:%S").to_string();
        let timeout = self.config.with_value(|c| c.notification_timeout_ms);
        if let Err(e) = platform::show_transient_notification(&NotificationSpec::test(&sent_at), timeout) {
            warn!("[App] Could not show notification: {}", e);
        }
    }

    pub fn set_online(&self, online: bool) {
        info!("[App] Connection: {}", if online { "online" } else { "offline" });
        store_set_online(&self.store, online);
    }

    pub fn set_install_available(&self, available: bool) {
        store_set_install_available(&self.store, available);
    }

    /// Show the browser's deferred install prompt
    pub async fn install_app(&self) {
        match platform::prompt_install().await {
            Ok(Some(outcome)) => {
                info!("[App] Install prompt outcome: {}", outcome);
                self.set_install_available(false);
            }
            Ok(None) => warn!("[App] No install prompt available"),
            Err(e) => error!("[App] Install prompt failed: {}", e),
        }
    }

    pub fn on_installed(&self) {
        info!("[App] PWA installed successfully");
        self.set_install_available(false);
        if platform::notification_permission().is_granted() {
            if let Err(e) = platform::show_notification(&NotificationSpec::installed()) {
                warn!("[App] Could not show notification: {}", e);
            }
        }
    }
}
