//! tidemark-yahoo
//!
//! [`PriceSeriesProvider`] over the Yahoo Finance chart endpoint.
//!
//! - Fine requests fetch one-minute bars; coarse requests fetch daily bars.
//! - The chart `range` is the smallest Yahoo range covering the request
//!   lookback. Minute bars are capped at `7d`, the longest range Yahoo serves
//!   at that interval.
//! - Unknown symbols yield an empty series; transport failures and non-success
//!   statuses become [`TidemarkError::Connector`].
#![warn(missing_docs)]

/// Chart endpoint abstraction and the reqwest-backed implementation.
pub mod adapter;
/// Wire types of the chart response.
pub mod chart;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tidemark_core::{
    PriceSeries, PriceSeriesProvider, Resolution, SeriesRequest, TidemarkError,
    dedup_exact, samples_from_closes,
};

use adapter::{PROVIDER, RealAdapter, YahooChart};
use chart::{ChartResponse, ChartResult};

#[cfg(feature = "test-adapters")]
type ChartAdapter = Arc<dyn YahooChart>;
#[cfg(not(feature = "test-adapters"))]
type ChartAdapter = Arc<RealAdapter>;

const DAY_SECS: u64 = 86_400;

/// Yahoo ranges usable with minute bars, smallest first.
const FINE_RANGES: &[(u64, &str)] = &[(1, "1d"), (5, "5d"), (7, "7d")];

/// Yahoo ranges usable with daily bars, smallest first.
const COARSE_RANGES: &[(u64, &str)] = &[
    (30, "1mo"),
    (90, "3mo"),
    (180, "6mo"),
    (365, "1y"),
    (730, "2y"),
    (1_826, "5y"),
    (3_652, "10y"),
];

/// Public provider type.
pub struct YahooProvider {
    chart: ChartAdapter,
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooProvider {
    /// Provider against the public Yahoo host.
    #[must_use]
    pub fn new() -> Self {
        Self::from_real(RealAdapter::new_default())
    }

    /// Provider against another chart host, e.g. a local mock server.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::from_real(RealAdapter::with_base_url(base_url))
    }

    /// Provider reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self::from_real(RealAdapter::new(http, base_url))
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn with_adapter(chart: Arc<dyn YahooChart>) -> Self {
        Self { chart }
    }

    fn from_real(adapter: RealAdapter) -> Self {
        Self {
            chart: Arc::new(adapter),
        }
    }
}

/// Yahoo `(range, interval)` codes for a request.
#[must_use]
pub fn chart_params(req: SeriesRequest) -> (&'static str, &'static str) {
    match req.resolution {
        Resolution::Fine => (pick_range(req.lookback, FINE_RANGES, "7d"), "1m"),
        Resolution::Coarse => (pick_range(req.lookback, COARSE_RANGES, "max"), "1d"),
    }
}

fn pick_range(lookback: Duration, table: &[(u64, &'static str)], widest: &'static str) -> &'static str {
    let days = lookback.as_secs().div_ceil(DAY_SECS);
    table
        .iter()
        .find(|(max_days, _)| days <= *max_days)
        .map_or(widest, |(_, code)| code)
}

/// Convert a chart document into a series at `resolution`.
///
/// # Errors
/// Returns `TidemarkError::Connector` for a chart-level error other than
/// "not found", and `TidemarkError::Data` when timestamps and closes disagree.
pub fn series_from_chart(
    resp: ChartResponse,
    resolution: Resolution,
) -> Result<PriceSeries, TidemarkError> {
    if let Some(err) = resp.chart.error {
        if err.is_not_found() {
            return Ok(PriceSeries::empty(resolution));
        }
        let msg = match err.description {
            Some(d) => format!("{}: {d}", err.code),
            None => err.code,
        };
        return Err(TidemarkError::connector(PROVIDER, msg));
    }
    let Some(result) = resp.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::empty(resolution));
    };
    let Some(timestamps) = result.timestamp.as_deref() else {
        return Ok(PriceSeries::empty(resolution));
    };
    let Some(closes) = closes_for(&result, resolution, timestamps.len()) else {
        return Ok(PriceSeries::empty(resolution));
    };
    let mut samples = samples_from_closes(timestamps, closes)?;
    samples.sort_by_key(|s| s.ts);
    dedup_exact(&mut samples);
    PriceSeries::new(resolution, samples)
}

/// Daily bars prefer the split and dividend adjusted close when it lines up.
fn closes_for(result: &ChartResult, resolution: Resolution, len: usize) -> Option<&[Option<f64>]> {
    if resolution == Resolution::Coarse
        && let Some(adj) = result
            .indicators
            .adjclose
            .as_ref()
            .and_then(|blocks| blocks.first())
        && adj.adjclose.len() == len
    {
        return Some(&adj.adjclose);
    }
    result
        .indicators
        .quote
        .first()
        .map(|q| q.close.as_slice())
}

#[async_trait]
impl PriceSeriesProvider for YahooProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tidemark_yahoo::fetch", skip(self), fields(resolution = %req.resolution))
    )]
    async fn fetch(&self, symbol: &str, req: SeriesRequest) -> Result<PriceSeries, TidemarkError> {
        let (range, interval) = chart_params(req);
        let resp = self.chart.chart(symbol, range, interval).await?;
        let series = series_from_chart(resp, req.resolution)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(symbol, range, interval, samples = series.len(), "chart fetched");
        Ok(series)
    }
}
