//! Configuration types shared across the controller and provider wrappers.

use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::horizon::{Anchor, HorizonSpec, coarse_horizons, fine_horizons};
use crate::series::{Resolution, SeriesRequest};

/// One resolution tier consumed by the fallback controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Resolution requested from the provider.
    pub resolution: Resolution,
    /// Trailing span requested from the provider.
    pub lookback: Duration,
    /// Horizons evaluated against this tier's series.
    pub horizons: Vec<HorizonSpec>,
    /// How the reference instant is anchored before alignment.
    pub anchor: Anchor,
}

impl TierConfig {
    /// Intraday tier: 7 trailing days, hour-level horizons plus end of day.
    #[must_use]
    pub fn fine() -> Self {
        Self {
            resolution: Resolution::Fine,
            lookback: Duration::from_secs(7 * 86_400),
            horizons: fine_horizons(),
            anchor: Anchor::Instant,
        }
    }

    /// Daily tier: one trailing year, day-level horizons, day-anchored.
    #[must_use]
    pub fn coarse() -> Self {
        Self {
            resolution: Resolution::Coarse,
            lookback: Duration::from_secs(365 * 86_400),
            horizons: coarse_horizons(),
            anchor: Anchor::StartOfDay,
        }
    }

    /// The provider request this tier issues.
    #[must_use]
    pub const fn request(&self) -> SeriesRequest {
        SeriesRequest::new(self.resolution, self.lookback)
    }
}

/// Global configuration for the `Tidemark` controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TidemarkConfig {
    /// Resolution tiers, tried in order until one succeeds.
    pub tiers: Vec<TierConfig>,
    /// Timezone whose calendar days define "end of day" and day anchoring.
    pub eod_timezone: Tz,
    /// Maximum number of events attributed concurrently by batch processing.
    pub max_concurrency: usize,
}

impl Default for TidemarkConfig {
    fn default() -> Self {
        Self {
            tiers: vec![TierConfig::fine(), TierConfig::coarse()],
            eod_timezone: Tz::UTC,
            max_concurrency: 4,
        }
    }
}

/// Configuration for the series cache wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Time-to-live of a cached series.
    pub ttl: Duration,
    /// Maximum number of cached series.
    pub max_entries: u64,
    /// Cache empty series as well as non-empty ones.
    pub cache_empty: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_entries: 1024,
            cache_empty: false,
        }
    }
}

/// Configuration for a fixed-window request budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuotaConfig {
    /// Maximum number of fetches allowed within a single window.
    pub limit: u64,
    /// Duration of the accounting window.
    pub window: Duration,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            limit: 1000,
            window: Duration::from_secs(60),
        }
    }
}
