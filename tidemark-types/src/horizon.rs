//! Forward horizons at which a price comparison is taken.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const HOUR: Duration = Duration::from_secs(3_600);
const DAY: Duration = Duration::from_secs(86_400);

/// How a horizon's target instant is derived from the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizonOffset {
    /// A fixed span added to the reference instant.
    Fixed(Duration),
    /// The last sample on the reference instant's calendar day (end of day).
    SameCalendarDay,
}

/// A labelled horizon, e.g. `"1h"` or `"EOD"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HorizonSpec {
    /// Label used as the key of the attribution result.
    pub label: String,
    /// Offset rule.
    pub offset: HorizonOffset,
}

impl HorizonSpec {
    /// Horizon at a fixed offset from the reference instant.
    pub fn fixed(label: impl Into<String>, offset: Duration) -> Self {
        Self {
            label: label.into(),
            offset: HorizonOffset::Fixed(offset),
        }
    }

    /// End-of-day horizon.
    pub fn end_of_day(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            offset: HorizonOffset::SameCalendarDay,
        }
    }
}

/// How the reference instant is anchored before alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Anchor {
    /// Align on the reference instant itself.
    #[default]
    Instant,
    /// Floor the reference instant to midnight of its calendar day first.
    ///
    /// Used against daily bars stamped at the start of the session day, so an
    /// intraday event maps onto its own day's bar.
    StartOfDay,
}

/// Horizons evaluated against intraday data: `1h`, `4h`, `EOD`, `1w`.
#[must_use]
pub fn fine_horizons() -> Vec<HorizonSpec> {
    vec![
        HorizonSpec::fixed("1h", HOUR),
        HorizonSpec::fixed("4h", HOUR * 4),
        HorizonSpec::end_of_day("EOD"),
        HorizonSpec::fixed("1w", DAY * 7),
    ]
}

/// Horizons evaluated against daily data: `1d`, `1w`.
///
/// Sub-day horizons are meaningless against daily samples, so this set is not
/// a subset of [`fine_horizons`].
#[must_use]
pub fn coarse_horizons() -> Vec<HorizonSpec> {
    vec![
        HorizonSpec::fixed("1d", DAY),
        HorizonSpec::fixed("1w", DAY * 7),
    ]
}
