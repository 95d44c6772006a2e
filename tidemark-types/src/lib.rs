//! Tidemark data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod attribution;
mod config;
mod error;
mod event;
mod horizon;
mod reports;
mod series;

pub use attribution::{AttributionEntry, AttributionResult, percent_change};
pub use config::{CacheConfig, QuotaConfig, TidemarkConfig, TierConfig};
pub use error::TidemarkError;
pub use event::{EventId, HorizonRecord, NewsEvent};
pub use horizon::{Anchor, HorizonOffset, HorizonSpec, coarse_horizons, fine_horizons};
pub use reports::{AttributionReport, EventFailure, ProcessReport, StoreOutcome};
pub use series::{Coverage, PriceSample, PriceSeries, Resolution, SeriesRequest};
