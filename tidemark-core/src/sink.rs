//! Persistence collaborator contract.

use async_trait::async_trait;

use crate::TidemarkError;
use tidemark_types::{AttributionResult, NewsEvent, StoreOutcome};

/// Stores attribution results, one record per horizon label.
///
/// Implementations own duplicate handling: re-storing the same
/// `(event, horizon)` pair must not create a second record.
#[async_trait]
pub trait AttributionSink: Send + Sync {
    /// Persist `result` for `event`.
    async fn store(
        &self,
        event: &NewsEvent,
        result: &AttributionResult,
    ) -> Result<StoreOutcome, TidemarkError>;
}
