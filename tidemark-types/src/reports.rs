//! Report envelopes produced by the controller and batch processing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attribution::AttributionResult;
use crate::error::TidemarkError;
use crate::event::EventId;

/// Summary of a single attribution run.
///
/// Carries the requested symbol and reference instant, the result (possibly
/// empty), and any non-fatal warnings encountered while walking tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionReport {
    /// Requested symbol.
    pub symbol: String,
    /// Reference instant.
    pub base_time: DateTime<Utc>,
    /// Attribution result; empty when no tier had data.
    pub result: AttributionResult,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<TidemarkError>,
}

/// Outcome of handing one result to the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreOutcome {
    /// Records newly written.
    pub inserted: usize,
    /// Records skipped (duplicates or rejected rows).
    pub skipped: usize,
}

/// A per-event failure captured during batch processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFailure {
    /// Event that failed.
    pub event_id: EventId,
    /// Symbol of the event.
    pub symbol: String,
    /// Failure cause.
    pub error: TidemarkError,
}

/// Summary of a batch run over many events.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Events examined.
    pub processed: usize,
    /// Events with at least one resolved horizon.
    pub attributed: usize,
    /// Events for which no tier had data.
    pub empty: usize,
    /// Records inserted across all events.
    pub inserted: usize,
    /// Records skipped across all events.
    pub skipped: usize,
    /// Events that failed at the provider or sink.
    pub failures: Vec<EventFailure>,
}
