//! Price samples and request-scoped price series.

use core::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TidemarkError;

/// Sampling resolution of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Intraday samples (minute bars from most providers).
    Fine,
    /// Daily samples.
    Coarse,
}

impl Resolution {
    /// Stable lowercase label used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fine => "fine",
            Self::Coarse => "coarse",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `{period, resolution}` window handed to a price series provider.
///
/// The window always ends at "now" from the provider's point of view; `lookback`
/// is the trailing span the provider should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesRequest {
    /// Trailing span to cover, ending at the provider's notion of "now".
    pub lookback: Duration,
    /// Requested sampling resolution.
    pub resolution: Resolution,
}

impl SeriesRequest {
    /// Build a request for the given resolution and trailing span.
    #[must_use]
    pub const fn new(resolution: Resolution, lookback: Duration) -> Self {
        Self {
            lookback,
            resolution,
        }
    }
}

/// Inclusive time span `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coverage {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Inclusive end.
    pub end: DateTime<Utc>,
}

impl Coverage {
    /// Returns true if `t` lies within `[start, end]`.
    #[must_use]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }
}

/// A single observed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceSample {
    /// Observation instant (UTC).
    pub ts: DateTime<Utc>,
    /// Observed price.
    pub price: Decimal,
}

impl PriceSample {
    /// Construct a sample.
    #[must_use]
    pub const fn new(ts: DateTime<Utc>, price: Decimal) -> Self {
        Self { ts, price }
    }
}

/// An ordered, immutable sequence of samples at a single resolution.
///
/// Samples are non-decreasing in `ts`. Duplicate timestamps are allowed and
/// keep the order in which the provider produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSeries {
    resolution: Resolution,
    samples: Vec<PriceSample>,
}

impl PriceSeries {
    /// Build a series from samples that are already in ascending time order.
    ///
    /// # Errors
    /// Returns `TidemarkError::Data` if two adjacent samples are out of order or
    /// if any price is negative.
    pub fn new(resolution: Resolution, samples: Vec<PriceSample>) -> Result<Self, TidemarkError> {
        if let Some(w) = samples.windows(2).find(|w| w[1].ts < w[0].ts) {
            return Err(TidemarkError::Data(format!(
                "{resolution} series out of order: {} follows {}",
                w[1].ts, w[0].ts
            )));
        }
        if let Some(s) = samples.iter().find(|s| s.price < Decimal::ZERO) {
            return Err(TidemarkError::Data(format!(
                "negative price {} at {}",
                s.price, s.ts
            )));
        }
        Ok(Self {
            resolution,
            samples,
        })
    }

    /// Build a series from samples in arbitrary order.
    ///
    /// The sort is stable, so samples sharing a timestamp keep their input order.
    ///
    /// # Errors
    /// Returns `TidemarkError::Data` if any price is negative.
    pub fn from_unsorted(
        resolution: Resolution,
        mut samples: Vec<PriceSample>,
    ) -> Result<Self, TidemarkError> {
        samples.sort_by_key(|s| s.ts);
        Self::new(resolution, samples)
    }

    /// An empty series (e.g. for an unknown symbol).
    #[must_use]
    pub const fn empty(resolution: Resolution) -> Self {
        Self {
            resolution,
            samples: Vec::new(),
        }
    }

    /// Declared resolution.
    #[must_use]
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Actual coverage `[first.ts, last.ts]`; `None` for an empty series.
    #[must_use]
    pub fn coverage(&self) -> Option<Coverage> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some(Coverage {
                start: first.ts,
                end: last.ts,
            }),
            _ => None,
        }
    }

    /// Samples in ascending time order.
    #[must_use]
    pub fn samples(&self) -> &[PriceSample] {
        &self.samples
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the series holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consume the series and return its samples.
    #[must_use]
    pub fn into_samples(self) -> Vec<PriceSample> {
        self.samples
    }
}
