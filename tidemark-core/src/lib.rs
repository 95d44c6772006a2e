//! tidemark-core
//!
//! Core traits and algorithms shared across the tidemark ecosystem.
//!
//! - `connector`: the `PriceSeriesProvider` trait.
//! - `sink`: the `AttributionSink` persistence contract.
//! - `middleware`: the `Middleware` trait implemented by provider wrappers.
//! - `timeseries`: alignment, horizon calculation, and cadence inference.
//!
//! Everything in `timeseries` is synchronous and pure; the only I/O in an
//! attribution run happens behind `PriceSeriesProvider::fetch`.
#![warn(missing_docs)]

/// Price series provider trait.
pub mod connector;
/// Middleware trait implemented by provider wrappers.
pub mod middleware;
/// Persistence collaborator trait.
pub mod sink;
/// Alignment, horizon, and inference utilities.
pub mod timeseries;

pub use connector::PriceSeriesProvider;
pub use middleware::Middleware;
pub use sink::AttributionSink;
pub use timeseries::align::resolve;
pub use timeseries::horizon::{BaseUnresolved, HorizonOptions, compute};
pub use timeseries::infer::{estimate_step_seconds, is_subdaily};
pub use timeseries::util::{dedup_exact, samples_from_closes};

pub use tidemark_types::*;
