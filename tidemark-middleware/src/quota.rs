//! Quota-aware provider wrapper.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;
use tidemark_core::{Middleware, PriceSeries, PriceSeriesProvider, SeriesRequest};
use tidemark_types::{QuotaConfig, TidemarkError};

/// Wrapper that enforces a fixed-window request budget.
pub struct QuotaAwareProvider {
    inner: Arc<dyn PriceSeriesProvider>,
    runtime: Mutex<QuotaRuntime>,
}

struct QuotaRuntime {
    limit: u64,
    calls_made_in_window: u64,
    last_reset: Instant,
    window: Duration,
}

impl QuotaAwareProvider {
    /// Create a new quota-aware wrapper around an existing provider.
    pub fn new(inner: Arc<dyn PriceSeriesProvider>, config: &QuotaConfig) -> Self {
        Self {
            inner,
            runtime: Mutex::new(QuotaRuntime {
                limit: config.limit,
                calls_made_in_window: 0,
                last_reset: Instant::now(),
                window: config.window,
            }),
        }
    }

    /// Check whether a call fits the current window and, if so, consume one unit.
    ///
    /// # Errors
    /// Returns `TidemarkError::QuotaExceeded` when the window budget is spent;
    /// `reset_in_ms` is the time until the window rolls over.
    pub fn should_allow_call(&self) -> Result<(), TidemarkError> {
        let mut rt = self.runtime.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        let elapsed = now.duration_since(rt.last_reset);
        if elapsed >= rt.window {
            rt.calls_made_in_window = 0;
            // Advance by whole windows so boundaries stay aligned across idle gaps.
            let window_nanos = rt.window.as_nanos().max(1);
            let windows_passed = elapsed.as_nanos() / window_nanos;
            let boundary_offset = Duration::from_nanos(
                (windows_passed * window_nanos)
                    .try_into()
                    .unwrap_or(u64::MAX),
            );
            rt.last_reset += boundary_offset;
        }

        if rt.calls_made_in_window < rt.limit {
            rt.calls_made_in_window += 1;
            return Ok(());
        }

        let elapsed = now.duration_since(rt.last_reset);
        let reset_in_ms = rt
            .window
            .saturating_sub(elapsed)
            .as_millis()
            .try_into()
            .unwrap_or(u64::MAX);
        let err = TidemarkError::QuotaExceeded {
            remaining: rt.limit.saturating_sub(rt.calls_made_in_window),
            reset_in_ms,
        };
        drop(rt);
        Err(err)
    }
}

/// Middleware config for constructing a [`QuotaAwareProvider`].
pub struct QuotaMiddleware {
    /// Budget applied to the wrapped provider.
    pub config: QuotaConfig,
}

impl QuotaMiddleware {
    /// Create a quota layer with the given budget.
    #[must_use]
    pub const fn new(config: QuotaConfig) -> Self {
        Self { config }
    }
}

impl Middleware for QuotaMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn PriceSeriesProvider>) -> Arc<dyn PriceSeriesProvider> {
        Arc::new(QuotaAwareProvider::new(inner, &self.config))
    }

    fn name(&self) -> &'static str {
        "QuotaAwareProvider"
    }

    fn config_json(&self) -> serde_json::Value {
        json!({
            "limit": self.config.limit,
            "window_ms": u64::try_from(self.config.window.as_millis()).unwrap_or(u64::MAX),
        })
    }
}

#[async_trait]
impl PriceSeriesProvider for QuotaAwareProvider {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn fetch(&self, symbol: &str, req: SeriesRequest) -> Result<PriceSeries, TidemarkError> {
        if let Err(e) = self.should_allow_call() {
            #[cfg(feature = "tracing")]
            tracing::warn!(provider = self.inner.name(), symbol, error = %e, "quota exhausted");
            return Err(e);
        }
        self.inner.fetch(symbol, req).await
    }
}
