//! Cache Worker
//!
//! Background worker for the offline to-do app:
//! - http / cache / network: request-response values and the two seams
//! - strategy: precache, stale-cache purge, cache-first fetch policy
//! - worker: per-event handlers and the lifecycle state
//! - web: browser bindings (wasm32 only)

mod cache;
mod error;
mod http;
mod lifecycle;
mod network;
mod notify;
mod strategy;
mod sync;
mod worker;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(test)]
mod testing;

pub use cache::{CacheStorage, MemoryCaches};
pub use error::{WorkerError, WorkerResult};
pub use http::{Destination, FetchRequest, HttpResponse, ResponseKind};
pub use lifecycle::WorkerState;
pub use network::Network;
pub use notify::{notification_click, ClickAction, ClientInfo};
pub use strategy::{cache_first, precache, purge_stale, FetchOutcome, ResponseSource};
pub use sync::{background_sync, SyncOutcome};
pub use worker::{EventKind, ServiceWorker, WorkerEvent, WorkerReply};
