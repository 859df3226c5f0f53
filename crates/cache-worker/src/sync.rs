//! Background Sync
//!
//! Extension point: the registered tag runs a placeholder task.

use log::{debug, info};
use pwa_shared::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Performed,
    /// Tag is not ours
    Ignored,
}

pub async fn background_sync(config: &AppConfig, tag: &str) -> SyncOutcome {
    if tag != config.sync_tag {
        debug!("[SW] Ignoring sync tag {}", tag);
        return SyncOutcome::Ignored;
    }
    info!("[SW] Performing background sync");
    SyncOutcome::Performed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_only_registered_tag_runs() {
        let config = AppConfig::default();
        assert_eq!(background_sync(&config, "background-sync").await, SyncOutcome::Performed);
        assert_eq!(background_sync(&config, "other").await, SyncOutcome::Ignored);
    }
}
