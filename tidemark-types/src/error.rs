use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tidemark workspace.
///
/// This wraps provider failures, argument and data validation errors, sink
/// failures, quota rejections and an aggregate for exhausted resolution tiers.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TidemarkError {
    /// Issues with the returned or expected data (unsorted series, negative prices, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual price series provider returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Provider name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Every resolution tier's fetch failed; contains the individual failures in tier order.
    #[error("all tiers failed: {0:?}")]
    AllTiersFailed(Vec<TidemarkError>),

    /// The request exceeds the configured quota budget for the current window.
    #[error("quota exceeded: remaining={remaining} reset_in_ms={reset_in_ms}")]
    QuotaExceeded {
        /// Remaining units at the time of rejection.
        remaining: u64,
        /// Milliseconds until the quota window resets.
        reset_in_ms: u64,
    },

    /// The persistence collaborator rejected or failed to store a result.
    #[error("sink failed: {msg}")]
    Sink {
        /// Human-readable error message.
        msg: String,
    },
}

impl TidemarkError {
    /// Helper: build a `Connector` error with the provider name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Sink` error.
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink { msg: msg.into() }
    }

    /// Flatten nested `AllTiersFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllTiersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
