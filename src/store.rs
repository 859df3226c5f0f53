//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Items mirror
//! what is persisted; the rest mirrors browser state.

use leptos::prelude::*;
use pwa_shared::Permission;
use reactive_stores::Store;

use crate::models::Item;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Items as last read back from storage
    pub items: Vec<Item>,
    /// Notification permission (read from the platform, never persisted)
    pub permission: Permission,
    /// navigator.onLine
    pub online: bool,
    /// A deferred install prompt is waiting
    pub install_available: bool,
}

impl AppState {
    pub fn new(online: bool, permission: Permission) -> Self {
        Self {
            online,
            permission,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the item list
pub fn store_set_items(store: &AppStore, items: Vec<Item>) {
    *store.items().write() = items;
}

pub fn store_set_permission(store: &AppStore, permission: Permission) {
    *store.permission().write() = permission;
}

pub fn store_set_online(store: &AppStore, online: bool) {
    *store.online().write() = online;
}

pub fn store_set_install_available(store: &AppStore, available: bool) {
    *store.install_available().write() = available;
}
