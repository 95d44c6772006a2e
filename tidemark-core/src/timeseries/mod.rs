//! Time-series algorithms over request-scoped price series.
//!
//! Modules include:
//! - `align`: forward-looking alignment with fallback-to-latest
//! - `horizon`: price and percent change at each horizon
//! - `infer`: cadence inference used to sanity-check declared resolutions
//! - `util`: normalization of raw provider samples
/// Alignment of target instants onto a sorted series.
pub mod align;
/// Horizon calculation against a single tier's series.
pub mod horizon;
/// Cadence inference and sub-daily detection helpers.
pub mod infer;
/// Normalization of raw provider samples.
pub mod util;
