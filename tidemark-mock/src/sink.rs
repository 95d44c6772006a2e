use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use tidemark_core::{
    AttributionResult, AttributionSink, EventId, HorizonRecord, NewsEvent, StoreOutcome,
    TidemarkError,
};

/// In-memory attribution store keyed by `(event_id, horizon)`.
///
/// Storing a record whose key already exists is a no-op counted as skipped,
/// so re-running a batch never duplicates rows.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<BTreeMap<(EventId, String), HorizonRecord>>,
    fail_symbols: HashSet<String>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every store for `symbol` with a sink error.
    #[must_use]
    pub fn failing_for(mut self, symbol: impl Into<String>) -> Self {
        self.fail_symbols.insert(symbol.into());
        self
    }

    /// Snapshot of all stored records in key order.
    pub async fn records(&self) -> Vec<HorizonRecord> {
        self.records.lock().await.values().cloned().collect()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// True when nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl AttributionSink for MemorySink {
    async fn store(
        &self,
        event: &NewsEvent,
        result: &AttributionResult,
    ) -> Result<StoreOutcome, TidemarkError> {
        if self.fail_symbols.contains(&event.symbol) {
            return Err(TidemarkError::sink(format!(
                "forced failure storing {}",
                event.id
            )));
        }
        let mut guard = self.records.lock().await;
        let mut outcome = StoreOutcome::default();
        for rec in HorizonRecord::from_result(event, result) {
            let key = (rec.event_id.clone(), rec.horizon.clone());
            if guard.contains_key(&key) {
                outcome.skipped += 1;
            } else {
                guard.insert(key, rec);
                outcome.inserted += 1;
            }
        }
        Ok(outcome)
    }
}
