//! Tidemark attributes news events to the price movement that follows them.
//!
//! Overview
//! - Given a symbol and a reference instant, locates the prevailing price and
//!   reports price and percent change at fixed forward horizons
//!   (`1h`, `4h`, `EOD`, `1w` on intraday data).
//! - Walks an ordered list of resolution tiers. When intraday data is missing
//!   or does not cover the reference instant, it falls back to daily data and
//!   its own horizon set (`1d`, `1w`). One tier produces every entry of a result.
//! - Prices come from any [`PriceSeriesProvider`] handed to the builder; no
//!   global sessions or shared mutable state.
//!
//! Key behaviors and trade-offs
//! - Alignment is forward-looking: the price at an instant is the first sample
//!   at or after it. A target past the end of the data takes the latest price,
//!   so a `1w` horizon on a recent event reports the move so far.
//! - Provider failures degrade to the next tier. An error is returned only
//!   when every tier's fetch failed; "no data anywhere" is an empty result.
//! - End of day is measured on calendar days of a configurable timezone
//!   (UTC by default).
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use tidemark::Tidemark;
//!
//! let tm = Tidemark::builder()
//!     .with_provider(Arc::new(tidemark_yahoo::YahooProvider::new()))
//!     .eod_timezone(chrono_tz::America::New_York)
//!     .build()?;
//!
//! let published = chrono::Utc::now() - chrono::TimeDelta::hours(3);
//! let result = tm.attribute("AAPL", published).await?;
//! for (label, entry) in result.iter() {
//!     println!("{label}: {} ({:?}%)", entry.price, entry.percent_change);
//! }
//! ```
//!
//! Batch processing with a persistence sink:
//! ```rust,ignore
//! let report = tm.process_events(&events, &sink).await;
//! println!("{} attributed, {} inserted", report.attributed, report.inserted);
//! ```
//!
//! See `tidemark/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Tidemark, TidemarkBuilder};
pub use router::util::{collapse_tier_errors, tag_err};

pub use tidemark_middleware::{CacheMiddleware, ProviderBuilder, QuotaMiddleware};

// Re-export core types for convenience
pub use tidemark_core::{
    Anchor, AttributionEntry, AttributionReport, AttributionResult, AttributionSink,
    CacheConfig, EventFailure, EventId, HorizonOffset, HorizonRecord, HorizonSpec, NewsEvent,
    PriceSample, PriceSeries, PriceSeriesProvider, ProcessReport, QuotaConfig, Resolution,
    SeriesRequest, StoreOutcome, TidemarkConfig, TidemarkError, TierConfig, coarse_horizons,
    fine_horizons,
};
