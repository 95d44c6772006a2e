use std::sync::Arc;

use async_trait::async_trait;

use crate::TidemarkError;
use tidemark_types::{PriceSeries, SeriesRequest};

/// Source of price series for a symbol.
///
/// Contract:
/// - Unknown symbols yield an empty series, not an error.
/// - Samples are stamped in UTC and sorted ascending.
/// - Errors are reserved for transport or parsing failures; the controller
///   treats them like an empty series when deciding whether to fall back.
#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// Stable provider name for logs and error tagging.
    fn name(&self) -> &'static str;

    /// Fetch a series covering `req.lookback` up to now at `req.resolution`.
    async fn fetch(&self, symbol: &str, req: SeriesRequest) -> Result<PriceSeries, TidemarkError>;
}

impl dyn PriceSeriesProvider {
    /// Build a provider from a synchronous closure. Handy in tests and examples.
    pub fn from_fn<F>(name: &'static str, f: F) -> Arc<dyn PriceSeriesProvider>
    where
        F: Fn(&str, SeriesRequest) -> Result<PriceSeries, TidemarkError> + Send + Sync + 'static,
    {
        struct FnProvider<F> {
            name: &'static str,
            f: F,
        }

        #[async_trait]
        impl<F> PriceSeriesProvider for FnProvider<F>
        where
            F: Fn(&str, SeriesRequest) -> Result<PriceSeries, TidemarkError>
                + Send
                + Sync
                + 'static,
        {
            fn name(&self) -> &'static str {
                self.name
            }

            async fn fetch(
                &self,
                symbol: &str,
                req: SeriesRequest,
            ) -> Result<PriceSeries, TidemarkError> {
                (self.f)(symbol, req)
            }
        }

        Arc::new(FnProvider { name, f })
    }
}
