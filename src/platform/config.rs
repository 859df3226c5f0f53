//! Config Override
//!
//! Reads `<script type="application/json" id="app-config">` if present.

use log::warn;
use pwa_shared::AppConfig;

const CONFIG_ELEMENT_ID: &str = "app-config";

pub fn load_config() -> AppConfig {
    let json = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    if json.trim().is_empty() {
        return AppConfig::default();
    }
    AppConfig::from_json(&json).unwrap_or_else(|e| {
        warn!("[App] Ignoring config override: {}", e);
        AppConfig::default()
    })
}
