use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tidemark_core::{PriceSeries, PriceSeriesProvider, Resolution, SeriesRequest, TidemarkError};

/// Instruction for how a fetch should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(TidemarkError),
    /// Hang indefinitely.
    Hang,
}

/// One recorded `fetch` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    /// Requested symbol.
    pub symbol: String,
    /// Requested window.
    pub request: SeriesRequest,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<(String, Resolution), MockBehavior<PriceSeries>>,
    calls: Vec<FetchCall>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior of `fetch` for a symbol at one resolution.
    pub async fn set_behavior(
        &self,
        symbol: &str,
        resolution: Resolution,
        behavior: MockBehavior<PriceSeries>,
    ) {
        let mut guard = self.state.lock().await;
        guard.rules.insert((symbol.to_string(), resolution), behavior);
    }

    /// Return a copy of every fetch recorded so far, in call order.
    pub async fn calls(&self) -> Vec<FetchCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of fetches recorded at `resolution`.
    pub async fn calls_at(&self, resolution: Resolution) -> usize {
        let guard = self.state.lock().await;
        guard
            .calls
            .iter()
            .filter(|c| c.request.resolution == resolution)
            .count()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.calls.clear();
    }
}

/// A provider that defers all behavior to an external controller.
///
/// Inputs without a configured behavior yield an empty series, matching the
/// unknown-symbol contract of real providers.
pub struct DynamicMockProvider {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockProvider {
    /// Create a new dynamic mock provider and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn PriceSeriesProvider>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn PriceSeriesProvider>, controller)
    }
}

#[async_trait]
impl PriceSeriesProvider for DynamicMockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, symbol: &str, req: SeriesRequest) -> Result<PriceSeries, TidemarkError> {
        // Log and snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(FetchCall {
                symbol: symbol.to_string(),
                request: req,
            });
            guard
                .rules
                .get(&(symbol.to_string(), req.resolution))
                .cloned()
        };

        match behavior {
            Some(MockBehavior::Return(series)) => Ok(series),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Ok(PriceSeries::empty(req.resolution)),
        }
    }
}
