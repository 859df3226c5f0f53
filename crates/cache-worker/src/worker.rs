//! Service Worker Handlers
//!
//! One handler per event kind. Each takes the event plus the worker's
//! caches/lifecycle state and returns a [`WorkerReply`] describing what the
//! platform glue should do with it.

use std::cell::Cell;
use std::fmt;

use log::{error, info, warn};
use pwa_shared::{AppConfig, NotificationSpec};

use crate::cache::CacheStorage;
use crate::http::FetchRequest;
use crate::lifecycle::WorkerState;
use crate::network::Network;
use crate::notify::{notification_click, ClickAction, ClientInfo};
use crate::strategy::{self, FetchOutcome};
use crate::sync::{background_sync, SyncOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Install,
    Activate,
    Fetch,
    Push,
    NotificationClick,
    Sync,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Install => "install",
            EventKind::Activate => "activate",
            EventKind::Fetch => "fetch",
            EventKind::Push => "push",
            EventKind::NotificationClick => "notificationclick",
            EventKind::Sync => "sync",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    Install,
    Activate,
    Fetch(FetchRequest),
    /// Push payload text, if any
    Push(Option<String>),
    NotificationClick {
        action: String,
        clients: Vec<ClientInfo>,
    },
    Sync(String),
}

impl WorkerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WorkerEvent::Install => EventKind::Install,
            WorkerEvent::Activate => EventKind::Activate,
            WorkerEvent::Fetch(_) => EventKind::Fetch,
            WorkerEvent::Push(_) => EventKind::Push,
            WorkerEvent::NotificationClick { .. } => EventKind::NotificationClick,
            WorkerEvent::Sync(_) => EventKind::Sync,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkerReply {
    /// Precache finished (`cached` is 0 when it failed)
    Installed { cached: usize, skip_waiting: bool },
    /// Stale stores removed; `claim` asks to control open pages now
    Activated { deleted: Vec<String>, claim: bool },
    Respond(FetchOutcome),
    ShowNotification(NotificationSpec),
    Click(ClickAction),
    Synced(SyncOutcome),
}

pub struct ServiceWorker<C, N> {
    config: AppConfig,
    /// Registration scope, absolute URL
    scope: String,
    caches: C,
    network: N,
    state: Cell<WorkerState>,
}

impl<C: CacheStorage, N: Network> ServiceWorker<C, N> {
    pub fn new(config: AppConfig, scope: &str, caches: C, network: N) -> Self {
        Self {
            config,
            scope: scope.to_string(),
            caches,
            network,
            state: Cell::new(WorkerState::Installing),
        }
    }

    /// Resume at a state the platform already reached
    pub fn with_state(self, state: WorkerState) -> Self {
        self.state.set(state);
        self
    }

    pub fn state(&self) -> WorkerState {
        self.state.get()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn caches(&self) -> &C {
        &self.caches
    }

    /// A newer worker took over
    pub fn supersede(&self) {
        info!("[SW] Superseded while {}", self.state());
        self.state.set(WorkerState::Redundant);
    }

    /// Follow a state change reported by the platform
    pub fn observe(&self, state: WorkerState) {
        if state.is_terminal() {
            self.supersede();
        } else {
            self.advance(state);
        }
    }

    pub async fn handle(&self, event: WorkerEvent) -> WorkerReply {
        info!("[SW] {} event", event.kind());
        match event {
            WorkerEvent::Install => self.on_install().await,
            WorkerEvent::Activate => self.on_activate().await,
            WorkerEvent::Fetch(request) => self.on_fetch(&request).await,
            WorkerEvent::Push(payload) => self.on_push(payload.as_deref()),
            WorkerEvent::NotificationClick { action, clients } => self.on_notification_click(&action, &clients),
            WorkerEvent::Sync(tag) => WorkerReply::Synced(background_sync(&self.config, &tag).await),
        }
    }

    async fn on_install(&self) -> WorkerReply {
        self.advance(WorkerState::Installing);
        let cached = match strategy::precache(&self.config, &self.caches, &self.network).await {
            Ok(count) => count,
            Err(e) => {
                error!("[SW] Caching failed: {}", e);
                0
            }
        };
        self.advance(WorkerState::Installed);
        WorkerReply::Installed { cached, skip_waiting: true }
    }

    async fn on_activate(&self) -> WorkerReply {
        self.advance(WorkerState::Activating);
        let deleted = match strategy::purge_stale(&self.config, &self.caches).await {
            Ok(deleted) => deleted,
            Err(e) => {
                error!("[SW] Listing caches failed: {}", e);
                Vec::new()
            }
        };
        self.advance(WorkerState::Activated);
        WorkerReply::Activated { deleted, claim: true }
    }

    async fn on_fetch(&self, request: &FetchRequest) -> WorkerReply {
        let outcome = strategy::cache_first(&self.config, &self.caches, &self.network, request).await;
        WorkerReply::Respond(outcome)
    }

    fn on_push(&self, payload: Option<&str>) -> WorkerReply {
        WorkerReply::ShowNotification(NotificationSpec::push(payload))
    }

    fn on_notification_click(&self, action: &str, clients: &[ClientInfo]) -> WorkerReply {
        WorkerReply::Click(notification_click(action, clients, &self.scope, &self.config.app_url))
    }

    /// Move to `target` unless a newer worker already made us redundant
    fn advance(&self, target: WorkerState) {
        let current = self.state.get();
        if current.is_terminal() {
            warn!("[SW] Ignoring move to {} after becoming redundant", target);
            return;
        }
        self.state.set(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCaches;
    use crate::http::HttpResponse;
    use crate::strategy::ResponseSource;
    use crate::testing::FakeNetwork;

    const SCOPE: &str = "https://app.test/";

    fn online_worker() -> ServiceWorker<MemoryCaches, FakeNetwork> {
        let config = AppConfig::default();
        let network = config.precache_urls.iter().fold(FakeNetwork::new(), |net, url| {
            net.serve(url, HttpResponse::ok(format!("asset {}", url)))
        });
        ServiceWorker::new(config, SCOPE, MemoryCaches::new(), network)
    }

    #[tokio::test]
    async fn test_install_then_activate() {
        let worker = online_worker();
        worker.caches().open("pwa-cache-v0");

        let expected = worker.config().precache_urls.len();
        let reply = worker.handle(WorkerEvent::Install).await;
        assert_eq!(reply, WorkerReply::Installed { cached: expected, skip_waiting: true });
        assert_eq!(worker.state(), WorkerState::Installed);

        let reply = worker.handle(WorkerEvent::Activate).await;
        assert_eq!(
            reply,
            WorkerReply::Activated { deleted: vec!["pwa-cache-v0".to_string()], claim: true }
        );
        assert_eq!(worker.state(), WorkerState::Activated);
        assert!(worker.caches().has("pwa-cache-v1"));
    }

    #[tokio::test]
    async fn test_install_failure_still_activates() {
        let worker = ServiceWorker::new(AppConfig::default(), SCOPE, MemoryCaches::new(), FakeNetwork::new());

        let reply = worker.handle(WorkerEvent::Install).await;
        assert_eq!(reply, WorkerReply::Installed { cached: 0, skip_waiting: true });

        worker.handle(WorkerEvent::Activate).await;
        assert!(worker.state().is_active());
    }

    #[tokio::test]
    async fn test_shell_loads_offline_after_install() {
        let worker = online_worker();
        worker.handle(WorkerEvent::Install).await;
        worker.handle(WorkerEvent::Activate).await;
        worker.network.set_offline(true);

        let reply = worker.handle(WorkerEvent::Fetch(FetchRequest::navigate("./index.html"))).await;
        match reply {
            WorkerReply::Respond(outcome) => {
                assert_eq!(outcome.source, ResponseSource::Cache);
                assert_eq!(outcome.response.body, b"asset ./index.html");
            }
            other => panic!("unexpected reply {:?}", other),
        }

        let reply = worker.handle(WorkerEvent::Fetch(FetchRequest::navigate("./about.html"))).await;
        match reply {
            WorkerReply::Respond(outcome) => assert_eq!(outcome.source, ResponseSource::OfflinePage),
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_push_and_click() {
        let worker = online_worker();

        match worker.handle(WorkerEvent::Push(Some("Ping".to_string()))).await {
            WorkerReply::ShowNotification(spec) => assert_eq!(spec.options.body, "Ping"),
            other => panic!("unexpected reply {:?}", other),
        }

        let reply = worker
            .handle(WorkerEvent::NotificationClick { action: "open".to_string(), clients: vec![] })
            .await;
        assert_eq!(reply, WorkerReply::Click(ClickAction::OpenWindow("./".to_string())));
    }

    #[tokio::test]
    async fn test_superseded_worker_stays_redundant() {
        let worker = online_worker();
        worker.handle(WorkerEvent::Install).await;
        worker.supersede();

        worker.handle(WorkerEvent::Activate).await;
        assert_eq!(worker.state(), WorkerState::Redundant);
    }

    #[tokio::test]
    async fn test_restarted_worker_keeps_platform_state() {
        let worker = online_worker().with_state(WorkerState::Activated);
        assert!(worker.state().is_active());

        let reply = worker.handle(WorkerEvent::Fetch(FetchRequest::get("./app.js"))).await;
        assert!(matches!(reply, WorkerReply::Respond(_)));
        assert_eq!(worker.state(), WorkerState::Activated);
    }

    #[test]
    fn test_observed_redundancy_is_final() {
        let worker = online_worker();
        worker.observe(WorkerState::Installed);
        assert_eq!(worker.state(), WorkerState::Installed);

        worker.observe(WorkerState::Redundant);
        worker.observe(WorkerState::Activated);
        assert_eq!(worker.state(), WorkerState::Redundant);
    }

    #[tokio::test]
    async fn test_sync_reply() {
        let worker = online_worker();
        let reply = worker.handle(WorkerEvent::Sync("background-sync".to_string())).await;
        assert_eq!(reply, WorkerReply::Synced(SyncOutcome::Performed));
        assert_eq!(WorkerEvent::Sync(String::new()).kind().to_string(), "sync");
    }
}
