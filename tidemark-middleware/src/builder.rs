//! Builder for composing providers with middleware layers.
//!
//! Layers form an "onion" around the raw provider. The `layers` vector stores
//! middleware outermost-first (last added = outermost) and `build()` applies
//! them in reverse:
//!
//! ```text
//! builder.with_quota(..).with_cache(..)
//!
//! Storage: [Cache, Quota]   (outermost first)
//! Applied: Raw -> Quota -> Cache
//! Result:  Cache(Quota(Raw))
//! ```

use std::sync::Arc;

use serde_json::json;
use tidemark_core::{Middleware, PriceSeriesProvider};
use tidemark_types::{CacheConfig, QuotaConfig};

use crate::cache::CacheMiddleware;
use crate::quota::QuotaMiddleware;

const CACHE: &str = "CachingMiddleware";
const QUOTA: &str = "QuotaAwareProvider";

/// Generic middleware builder for composing a provider with layered wrappers.
pub struct ProviderBuilder {
    raw: Arc<dyn PriceSeriesProvider>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ProviderBuilder {
    /// Create a new builder from a raw, unwrapped provider.
    #[must_use]
    pub fn new(raw: Arc<dyn PriceSeriesProvider>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the cache layer at the outermost position.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != CACHE);
        self.layers
            .insert(0, Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove the cache layer if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CACHE);
        self
    }

    /// Add or replace the quota layer at the outermost position.
    #[must_use]
    pub fn with_quota(mut self, cfg: &QuotaConfig) -> Self {
        self.layers.retain(|m| m.name() != QUOTA);
        self.layers
            .insert(0, Box::new(QuotaMiddleware::new(cfg.clone())));
        self
    }

    /// Describe the stack outermost-first, ending with the raw provider.
    #[must_use]
    pub fn describe(&self) -> Vec<(&'static str, serde_json::Value)> {
        let mut out: Vec<_> = self
            .layers
            .iter()
            .map(|m| (m.name(), m.config_json()))
            .collect();
        out.push(("RawProvider", json!({ "name": self.raw.name() })));
        out
    }

    /// Build the wrapped provider, applying layers innermost first.
    #[must_use]
    pub fn build(self) -> Arc<dyn PriceSeriesProvider> {
        let mut acc: Arc<dyn PriceSeriesProvider> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
