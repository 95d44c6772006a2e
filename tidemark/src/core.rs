use std::collections::HashSet;
use std::sync::Arc;

use chrono_tz::Tz;
use tidemark_core::{
    CacheConfig, PriceSeriesProvider, QuotaConfig, TidemarkConfig, TidemarkError, TierConfig,
};
use tidemark_middleware::ProviderBuilder;

/// Attribution engine bound to one price series provider.
///
/// Holds no mutable state; clone the `Arc` around it or share `&Tidemark`
/// across tasks freely.
pub struct Tidemark {
    pub(crate) provider: Arc<dyn PriceSeriesProvider>,
    pub(crate) cfg: TidemarkConfig,
}

/// Builder for constructing a `Tidemark` engine with custom configuration.
pub struct TidemarkBuilder {
    provider: Option<Arc<dyn PriceSeriesProvider>>,
    cfg: TidemarkConfig,
    cache: Option<CacheConfig>,
    quota: Option<QuotaConfig>,
}

impl Default for TidemarkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TidemarkBuilder {
    /// Create a new builder with the default fine-then-coarse tiers.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no provider; you must set one via [`with_provider`](Self::with_provider).
    /// - End of day is measured in UTC unless [`eod_timezone`](Self::eod_timezone)
    ///   says otherwise.
    #[must_use]
    pub fn new() -> Self {
        Self {
            provider: None,
            cfg: TidemarkConfig::default(),
            cache: None,
            quota: None,
        }
    }

    /// Set the price series provider. A later call replaces an earlier one.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn PriceSeriesProvider>) -> Self {
        self.provider = Some(p);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: TidemarkConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Replace the ordered resolution tiers.
    ///
    /// Tiers are tried first to last and the first one that yields a result
    /// wins; later tiers are never fetched once an earlier one succeeds.
    #[must_use]
    pub fn tiers(mut self, tiers: Vec<TierConfig>) -> Self {
        self.cfg.tiers = tiers;
        self
    }

    /// Append a tier after the existing ones.
    #[must_use]
    pub fn push_tier(mut self, tier: TierConfig) -> Self {
        self.cfg.tiers.push(tier);
        self
    }

    /// Timezone whose calendar days define end of day and day anchoring.
    ///
    /// Use the listing exchange's zone (e.g. `America/New_York`) to make "end
    /// of day" mean the session close rather than UTC midnight.
    #[must_use]
    pub const fn eod_timezone(mut self, tz: Tz) -> Self {
        self.cfg.eod_timezone = tz;
        self
    }

    /// Maximum number of events attributed concurrently by
    /// [`Tidemark::process_events`].
    #[must_use]
    pub const fn max_concurrency(mut self, n: usize) -> Self {
        self.cfg.max_concurrency = n;
        self
    }

    /// Wrap the provider in a TTL cache.
    ///
    /// Batches with many events for one symbol then fetch each tier once.
    #[must_use]
    pub fn cache(mut self, cfg: CacheConfig) -> Self {
        self.cache = Some(cfg);
        self
    }

    /// Wrap the provider in a fixed-window request budget.
    ///
    /// When combined with [`cache`](Self::cache), the cache sits outside the
    /// quota so cache hits do not spend budget.
    #[must_use]
    pub fn quota(mut self, cfg: QuotaConfig) -> Self {
        self.quota = Some(cfg);
        self
    }

    /// Build the `Tidemark` engine.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no provider was set, if there are no tiers, if a
    /// tier has no horizons or repeats a label, or if `max_concurrency` is zero.
    pub fn build(self) -> Result<Tidemark, TidemarkError> {
        let Some(raw) = self.provider else {
            return Err(TidemarkError::InvalidArg(
                "no provider registered; set one via with_provider(...)".to_string(),
            ));
        };
        if self.cfg.tiers.is_empty() {
            return Err(TidemarkError::InvalidArg(
                "at least one resolution tier is required".to_string(),
            ));
        }
        for tier in &self.cfg.tiers {
            if tier.horizons.is_empty() {
                return Err(TidemarkError::InvalidArg(format!(
                    "{} tier has no horizons",
                    tier.resolution
                )));
            }
            let mut seen = HashSet::new();
            if let Some(dup) = tier.horizons.iter().find(|h| !seen.insert(h.label.as_str())) {
                return Err(TidemarkError::InvalidArg(format!(
                    "{} tier repeats horizon label {}",
                    tier.resolution, dup.label
                )));
            }
        }
        if self.cfg.max_concurrency == 0 {
            return Err(TidemarkError::InvalidArg(
                "max_concurrency must be at least 1".to_string(),
            ));
        }

        let mut layered = ProviderBuilder::new(raw);
        if let Some(q) = &self.quota {
            layered = layered.with_quota(q);
        }
        if let Some(c) = &self.cache {
            layered = layered.with_cache(c);
        }

        Ok(Tidemark {
            provider: layered.build(),
            cfg: self.cfg,
        })
    }
}

impl Tidemark {
    /// Start building a new `Tidemark` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let tm = tidemark::Tidemark::builder()
    ///     .with_provider(Arc::new(tidemark_mock::MockProvider::new()))
    ///     .eod_timezone(chrono_tz::America::New_York)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TidemarkBuilder {
        TidemarkBuilder::new()
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &TidemarkConfig {
        &self.cfg
    }

    /// Name of the (possibly wrapped) provider.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}
