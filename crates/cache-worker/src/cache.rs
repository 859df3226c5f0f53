//! Cache Storage - Core Traits
//!
//! Abstract interface over the platform's `caches` object.
//! Implementations: the browser CacheStorage (wasm32) and an in-memory map.

use std::cell::RefCell;
use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::WorkerResult;
use crate::http::{FetchRequest, HttpResponse};

/// Named, versioned response stores keyed by request URL
///
/// Futures are `?Send`: the worker is single-threaded and the browser
/// handles are not `Send`.
#[async_trait(?Send)]
pub trait CacheStorage {
    /// Names of every cache store
    async fn keys(&self) -> WorkerResult<Vec<String>>;

    /// Drop a whole store; `false` when it did not exist
    async fn delete(&self, cache_name: &str) -> WorkerResult<bool>;

    /// Look a URL up across all stores, like `caches.match`
    async fn match_url(&self, url: &str) -> WorkerResult<Option<HttpResponse>>;

    /// Look an intercepted request up, like `caches.match(request)`.
    /// Only GET requests can hit.
    async fn match_request(&self, request: &FetchRequest) -> WorkerResult<Option<HttpResponse>> {
        if !request.is_get() {
            return Ok(None);
        }
        self.match_url(&request.url).await
    }

    /// Store a response, creating the store on first use
    async fn put(&self, cache_name: &str, url: &str, response: HttpResponse) -> WorkerResult<()>;
}

/// In-memory cache storage
#[derive(Debug, Default)]
pub struct MemoryCaches {
    stores: RefCell<BTreeMap<String, BTreeMap<String, HttpResponse>>>,
}

impl MemoryCaches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store (no-op if it exists)
    pub fn open(&self, cache_name: &str) {
        self.stores.borrow_mut().entry(cache_name.to_string()).or_default();
    }

    pub fn has(&self, cache_name: &str) -> bool {
        self.stores.borrow().contains_key(cache_name)
    }

    /// URLs held by one store, sorted
    pub fn urls(&self, cache_name: &str) -> Vec<String> {
        self.stores
            .borrow()
            .get(cache_name)
            .map(|store| store.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, cache_name: &str, url: &str) -> Option<HttpResponse> {
        self.stores.borrow().get(cache_name)?.get(url).cloned()
    }
}

#[async_trait(?Send)]
impl CacheStorage for MemoryCaches {
    async fn keys(&self) -> WorkerResult<Vec<String>> {
        Ok(self.stores.borrow().keys().cloned().collect())
    }

    async fn delete(&self, cache_name: &str) -> WorkerResult<bool> {
        Ok(self.stores.borrow_mut().remove(cache_name).is_some())
    }

    async fn match_url(&self, url: &str) -> WorkerResult<Option<HttpResponse>> {
        Ok(self
            .stores
            .borrow()
            .values()
            .find_map(|store| store.get(url).cloned()))
    }

    async fn put(&self, cache_name: &str, url: &str, response: HttpResponse) -> WorkerResult<()> {
        self.stores
            .borrow_mut()
            .entry(cache_name.to_string())
            .or_default()
            .insert(url.to_string(), response);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_match_across_stores() {
        let caches = MemoryCaches::new();
        caches.put("old", "/a", HttpResponse::ok("a")).await.unwrap();
        caches.put("new", "/b", HttpResponse::ok("b")).await.unwrap();

        assert_eq!(caches.match_url("/a").await.unwrap().unwrap().body, b"a");
        assert_eq!(caches.match_url("/b").await.unwrap().unwrap().body, b"b");
        assert!(caches.match_url("/c").await.unwrap().is_none());
        assert_eq!(caches.keys().await.unwrap(), vec!["new".to_string(), "old".to_string()]);
    }

    #[tokio::test]
    async fn test_match_request_ignores_non_get() {
        let caches = MemoryCaches::new();
        caches.put("v1", "/api", HttpResponse::ok("cached")).await.unwrap();

        let post = FetchRequest {
            method: "POST".to_string(),
            ..FetchRequest::get("/api")
        };
        assert!(caches.match_request(&post).await.unwrap().is_none());
        assert!(caches.match_request(&FetchRequest::get("/api")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_store() {
        let caches = MemoryCaches::new();
        caches.open("v1");
        assert!(caches.delete("v1").await.unwrap());
        assert!(!caches.delete("v1").await.unwrap());
        assert!(!caches.has("v1"));
    }
}
