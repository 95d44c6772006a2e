use async_trait::async_trait;
use tidemark_core::{PriceSeries, PriceSeriesProvider, SeriesRequest, TidemarkError};

mod dynamic;
mod fixtures;
mod sink;

pub use dynamic::{DynamicMockController, DynamicMockProvider, FetchCall, MockBehavior};
pub use sink::MemorySink;

/// Mock provider for CI-safe examples. Serves deterministic data from static fixtures.
pub struct MockProvider;

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn maybe_fail(symbol: &str, req: SeriesRequest) -> Result<(), TidemarkError> {
        match symbol {
            "FAIL" => Err(TidemarkError::connector(
                "tidemark-mock",
                format!("forced failure: {} series", req.resolution),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PriceSeriesProvider for MockProvider {
    fn name(&self) -> &'static str {
        "tidemark-mock"
    }

    async fn fetch(&self, symbol: &str, req: SeriesRequest) -> Result<PriceSeries, TidemarkError> {
        Self::maybe_fail(symbol, req)?;
        Ok(fixtures::series::by_symbol(symbol, req.resolution)
            .unwrap_or_else(|| PriceSeries::empty(req.resolution)))
    }
}
