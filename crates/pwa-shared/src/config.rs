//! Application Config
//!
//! One config object for the page and the worker. Every field has a default
//! so a partial JSON override is enough.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading a config override
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid app config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// localStorage key holding the serialized item list
    pub storage_key: String,
    /// Script path passed to `navigator.serviceWorker.register`
    pub worker_path: String,
    /// Versioned cache store name; any other store is purged on activate
    pub cache_name: String,
    /// Assets stored during install
    pub precache_urls: Vec<String>,
    /// Served for navigations that fail at the network layer
    pub offline_page: String,
    /// Window opened by notification clicks
    pub app_url: String,
    /// Background sync tag handled by the worker
    pub sync_tag: String,
    /// Auto-dismiss delay for the test notification
    pub notification_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: "pwa-todos".to_string(),
            worker_path: "./sw.js".to_string(),
            cache_name: "pwa-cache-v1".to_string(),
            precache_urls: [
                "./",
                "./index.html",
                "./app.js",
                "./app_bg.wasm",
                "./style.css",
                "./manifest.json",
                "./offline.html",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            offline_page: "./offline.html".to_string(),
            app_url: "./".to_string(),
            sync_tag: "background-sync".to_string(),
            notification_timeout_ms: 5000,
        }
    }
}

impl AppConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when `name` is the cache store for this version
    pub fn is_current_cache(&self, name: &str) -> bool {
        self.cache_name == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_precache_includes_offline_page() {
        let config = AppConfig::default();
        assert!(config.precache_urls.contains(&config.offline_page));
        assert_eq!(config.cache_name, "pwa-cache-v1");
    }

    #[test]
    fn test_default_precache_covers_app_shell() {
        let config = AppConfig::default();
        for asset in ["./index.html", "./app.js", "./app_bg.wasm", "./style.css", "./manifest.json"] {
            assert!(config.precache_urls.iter().any(|u| u == asset), "{} not precached", asset);
        }
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"cacheName":"pwa-cache-v2"}"#).unwrap();
        assert_eq!(config.cache_name, "pwa-cache-v2");
        assert_eq!(config.storage_key, "pwa-todos");
        assert!(config.is_current_cache("pwa-cache-v2"));
        assert!(!config.is_current_cache("pwa-cache-v1"));
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        assert!(AppConfig::from_json("{not json").is_err());
    }
}
