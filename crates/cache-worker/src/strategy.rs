//! Cache Policy
//!
//! Install-time precache, activate-time purge, and the per-request
//! cache-first decision tree:
//!
//! 1. cache hit (GET only) -> cached response, no network call
//! 2. miss -> network; a same-origin 200 GET is copied into the cache
//! 3. network failure -> offline page for navigations, 503 otherwise

use log::{debug, error, info, warn};
use pwa_shared::AppConfig;

use crate::cache::CacheStorage;
use crate::error::{WorkerError, WorkerResult};
use crate::http::{FetchRequest, HttpResponse};
use crate::network::Network;

/// Where a fetch answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Cache,
    Network,
    OfflinePage,
    Synthesized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub response: HttpResponse,
    pub source: ResponseSource,
}

impl FetchOutcome {
    fn new(response: HttpResponse, source: ResponseSource) -> Self {
        Self { response, source }
    }
}

/// Fetch every precache URL, then store them all. Any failure stores
/// nothing, matching `cache.addAll`.
pub async fn precache<C, N>(config: &AppConfig, caches: &C, network: &N) -> WorkerResult<usize>
where
    C: CacheStorage + ?Sized,
    N: Network + ?Sized,
{
    info!("[SW] Caching {} files", config.precache_urls.len());
    let mut fetched = Vec::with_capacity(config.precache_urls.len());
    for url in &config.precache_urls {
        let response = network.fetch(&FetchRequest::get(url)).await?;
        if response.status != 200 {
            return Err(WorkerError::BadStatus {
                url: url.clone(),
                status: response.status,
            });
        }
        fetched.push((url, response));
    }

    let count = fetched.len();
    for (url, response) in fetched {
        caches.put(&config.cache_name, url, response).await?;
    }
    Ok(count)
}

/// Delete every cache store except the current version's. Returns the
/// names that were removed; a failed delete is logged and skipped.
pub async fn purge_stale<C>(config: &AppConfig, caches: &C) -> WorkerResult<Vec<String>>
where
    C: CacheStorage + ?Sized,
{
    let mut deleted = Vec::new();
    for name in caches.keys().await? {
        if config.is_current_cache(&name) {
            continue;
        }
        info!("[SW] Deleting old cache: {}", name);
        match caches.delete(&name).await {
            Ok(true) => deleted.push(name),
            Ok(false) => {}
            Err(e) => warn!("[SW] Failed to delete cache {}: {}", name, e),
        }
    }
    Ok(deleted)
}

/// Answer one intercepted request
pub async fn cache_first<C, N>(
    config: &AppConfig,
    caches: &C,
    network: &N,
    request: &FetchRequest,
) -> FetchOutcome
where
    C: CacheStorage + ?Sized,
    N: Network + ?Sized,
{
    match caches.match_request(request).await {
        Ok(Some(cached)) => {
            debug!("[SW] Found in cache: {}", request.url);
            return FetchOutcome::new(cached, ResponseSource::Cache);
        }
        Ok(None) => {}
        Err(e) => warn!("[SW] Cache lookup failed for {}: {}", request.url, e),
    }

    debug!("[SW] Fetching from network: {}", request.url);
    match network.fetch(request).await {
        Ok(response) => {
            if request.is_get() && response.is_cacheable() {
                if let Err(e) = caches
                    .put(&config.cache_name, &request.url, response.clone())
                    .await
                {
                    warn!("[SW] Failed to cache {}: {}", request.url, e);
                }
            }
            FetchOutcome::new(response, ResponseSource::Network)
        }
        Err(e) => {
            info!("[SW] Fetch failed: {}: {}", request.url, e);
            offline_fallback(config, caches, request).await
        }
    }
}

async fn offline_fallback<C>(config: &AppConfig, caches: &C, request: &FetchRequest) -> FetchOutcome
where
    C: CacheStorage + ?Sized,
{
    if request.is_navigation() {
        match caches.match_url(&config.offline_page).await {
            Ok(Some(page)) => return FetchOutcome::new(page, ResponseSource::OfflinePage),
            Ok(None) => warn!("[SW] Offline page {} is not cached", config.offline_page),
            Err(e) => error!("[SW] Offline page lookup failed: {}", e),
        }
    }
    FetchOutcome::new(HttpResponse::service_unavailable(), ResponseSource::Synthesized)
}
