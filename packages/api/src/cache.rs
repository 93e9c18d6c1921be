//! # Keyed response cache
//!
//! [`CachedTransport`] memoises successful `GET` responses by
//! [`ApiRequest::cache_key`] for a fixed time-to-live, so views that mount
//! together (the navigation genre strip and the movie filters, for instance)
//! share one request.
//!
//! A successful mutation drops every entry under the same top-level
//! resource: `PUT /films/3/video-url` evicts `/films/3`, `/films/all` and
//! `/films?...`. Mutations under `/auth` change who is signed in, so they
//! clear the whole cache. A TTL of zero turns caching off.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

#[derive(Clone, Debug)]
struct CacheEntry {
    response: ApiResponse,
    stored_at: i64,
}

/// [`Transport`] decorator with a shared in-memory cache. Clones share entries.
#[derive(Clone)]
pub struct CachedTransport<T> {
    inner: T,
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    ttl_ms: i64,
    now: fn() -> i64,
}

impl<T> CachedTransport<T> {
    pub fn new(inner: T, ttl_secs: u32) -> Self {
        Self {
            inner,
            entries: Arc::default(),
            ttl_ms: i64::from(ttl_secs) * 1000,
            now: store::clock::now_millis,
        }
    }

    /// Builder method to replace the clock.
    pub fn with_clock(mut self, now: fn() -> i64) -> Self {
        self.now = now;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Drop every entry under `path`'s top-level resource.
    pub fn invalidate(&self, path: &str) {
        let resource = resource_of(path);
        if let Ok(mut entries) = self.entries.lock() {
            entries.retain(|key, _| resource_of(key) != resource);
        }
    }

    fn lookup(&self, key: &str) -> Option<ApiResponse> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;
        ((self.now)() - entry.stored_at < self.ttl_ms).then(|| entry.response.clone())
    }

    fn store(&self, key: String, response: &ApiResponse) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key,
                CacheEntry {
                    response: response.clone(),
                    stored_at: (self.now)(),
                },
            );
        }
    }
}

/// First path segment: `/films/3?x=1` → `films`.
fn resource_of(path: &str) -> &str {
    let path = path.split('?').next().unwrap_or("");
    path.trim_start_matches('/').split('/').next().unwrap_or("")
}

impl<T: Transport> Transport for CachedTransport<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if self.ttl_ms <= 0 {
            return self.inner.send(request).await;
        }

        if request.method == Method::Get {
            let key = request.cache_key();
            if let Some(hit) = self.lookup(&key) {
                tracing::debug!("cache hit {}", key);
                return Ok(hit);
            }
            let response = self.inner.send(request).await?;
            if response.is_success() {
                self.store(key, &response);
            }
            return Ok(response);
        }

        let path = request.path.clone();
        let response = self.inner.send(request).await?;
        if response.is_success() {
            if resource_of(&path) == "auth" {
                self.clear();
            } else {
                self.invalidate(&path);
            }
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use std::sync::atomic::{AtomicI64, Ordering};

    // Each test that moves time gets its own clock.
    static CLOCK_TTL: AtomicI64 = AtomicI64::new(0);

    fn ttl_clock() -> i64 {
        CLOCK_TTL.load(Ordering::SeqCst)
    }

    fn frozen() -> i64 {
        0
    }

    #[test]
    fn test_resource_of() {
        assert_eq!(resource_of("/films/3/video-url"), "films");
        assert_eq!(resource_of("/films?page=2"), "films");
        assert_eq!(resource_of("/watch-history"), "watch-history");
        assert_eq!(resource_of(""), "");
    }

    #[tokio::test]
    async fn test_get_served_once_within_ttl() {
        let fake = FakeTransport::new();
        fake.respond("/genres", ApiResponse::new(200, "[]"));
        let cached = CachedTransport::new(fake.clone(), 60).with_clock(ttl_clock);

        CLOCK_TTL.store(1_000, Ordering::SeqCst);
        cached.send(ApiRequest::get("/genres")).await.unwrap();
        cached.send(ApiRequest::get("/genres")).await.unwrap();
        assert_eq!(fake.requests().len(), 1);

        CLOCK_TTL.store(61_000, Ordering::SeqCst);
        cached.send(ApiRequest::get("/genres")).await.unwrap();
        assert_eq!(fake.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_query_is_part_of_key() {
        let fake = FakeTransport::new();
        fake.respond("/films", ApiResponse::new(200, "[]"));
        let cached = CachedTransport::new(fake.clone(), 60).with_clock(frozen);

        cached.send(ApiRequest::get("/films").with_query("page", 1)).await.unwrap();
        cached.send(ApiRequest::get("/films").with_query("page", 2)).await.unwrap();
        cached.send(ApiRequest::get("/films").with_query("page", 1)).await.unwrap();
        assert_eq!(fake.requests().len(), 2);
        assert_eq!(cached.len(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let fake = FakeTransport::new();
        fake.respond("/films/9", ApiResponse::new(500, "boom"));
        let cached = CachedTransport::new(fake.clone(), 60).with_clock(frozen);

        cached.send(ApiRequest::get("/films/9")).await.unwrap();
        cached.send(ApiRequest::get("/films/9")).await.unwrap();
        assert_eq!(fake.requests().len(), 2);
        assert!(cached.is_empty());
    }

    #[tokio::test]
    async fn test_mutation_invalidates_resource() {
        let fake = FakeTransport::new();
        fake.respond("/films/all", ApiResponse::new(200, "[]"));
        fake.respond("/films/3", ApiResponse::new(200, "{}"));
        fake.respond("/genres", ApiResponse::new(200, "[]"));
        fake.respond("/films/3/video-url", ApiResponse::new(200, "{}"));
        let cached = CachedTransport::new(fake.clone(), 60).with_clock(frozen);

        cached.send(ApiRequest::get("/films/all")).await.unwrap();
        cached.send(ApiRequest::get("/films/3")).await.unwrap();
        cached.send(ApiRequest::get("/genres")).await.unwrap();
        assert_eq!(cached.len(), 3);

        cached.send(ApiRequest::put("/films/3/video-url")).await.unwrap();
        assert_eq!(cached.len(), 1);

        cached.send(ApiRequest::get("/genres")).await.unwrap();
        assert_eq!(fake.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_auth_mutation_clears_everything() {
        let fake = FakeTransport::new();
        fake.respond("/favorites", ApiResponse::new(200, "[]"));
        fake.respond("/auth/logout", ApiResponse::new(200, ""));
        let cached = CachedTransport::new(fake.clone(), 60).with_clock(frozen);

        cached.send(ApiRequest::get("/favorites")).await.unwrap();
        cached.send(ApiRequest::post("/auth/logout")).await.unwrap();
        assert!(cached.is_empty());
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let fake = FakeTransport::new();
        fake.respond("/genres", ApiResponse::new(200, "[]"));
        let cached = CachedTransport::new(fake.clone(), 0);

        cached.send(ApiRequest::get("/genres")).await.unwrap();
        cached.send(ApiRequest::get("/genres")).await.unwrap();
        assert_eq!(fake.requests().len(), 2);
    }
}
