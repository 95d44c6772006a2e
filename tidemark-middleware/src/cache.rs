use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde_json::json;
use tidemark_core::{Middleware, PriceSeries, PriceSeriesProvider, Resolution, SeriesRequest};
use tidemark_types::{CacheConfig, TidemarkError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SeriesKey {
    symbol: String,
    resolution: Resolution,
    lookback: Duration,
}

impl SeriesKey {
    fn new(symbol: &str, req: SeriesRequest) -> Self {
        Self {
            symbol: symbol.to_string(),
            resolution: req.resolution,
            lookback: req.lookback,
        }
    }
}

/// Declarative wrapper that applies caching when building a provider stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Create a cache layer with the given TTL and capacity.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn PriceSeriesProvider>) -> Arc<dyn PriceSeriesProvider> {
        let Self { cfg } = *self;
        Arc::new(CachingProvider::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        json!({
            "ttl_ms": u64::try_from(self.cfg.ttl.as_millis()).unwrap_or(u64::MAX),
            "max_entries": self.cfg.max_entries,
            "cache_empty": self.cfg.cache_empty,
        })
    }
}

/// Provider wrapper that serves repeated fetches from a TTL cache.
///
/// Each cached series is an immutable snapshot; the attribution core never
/// mutates what it receives, so sharing one across callers is safe.
pub struct CachingProvider {
    inner: Arc<dyn PriceSeriesProvider>,
    cache: Cache<SeriesKey, PriceSeries>,
    cache_empty: bool,
}

impl CachingProvider {
    /// Wrap `inner` with a cache sized and timed by `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn PriceSeriesProvider>, cfg: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(cfg.max_entries.max(1))
            .time_to_live(cfg.ttl)
            .build();
        Self {
            inner,
            cache,
            cache_empty: cfg.cache_empty,
        }
    }
}

#[async_trait]
impl PriceSeriesProvider for CachingProvider {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tidemark::middleware::cache::fetch",
            skip(self),
            fields(provider = self.inner.name(), resolution = %req.resolution),
        )
    )]
    async fn fetch(&self, symbol: &str, req: SeriesRequest) -> Result<PriceSeries, TidemarkError> {
        let key = SeriesKey::new(symbol, req);
        if let Some(hit) = self.cache.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(symbol, "series cache hit");
            return Ok(hit);
        }
        let series = self.inner.fetch(symbol, req).await?;
        if self.cache_empty || !series.is_empty() {
            self.cache.insert(key, series.clone()).await;
        }
        Ok(series)
    }
}
