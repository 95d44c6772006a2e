//! Attribution results: price behavior at each resolved horizon.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::series::{PriceSample, Resolution};

/// Percent change `(price - base) / base * 100`.
///
/// Returns `None` when `base` is zero or the arithmetic overflows.
#[must_use]
pub fn percent_change(price: Decimal, base: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        return None;
    }
    price
        .checked_sub(base)?
        .checked_div(base)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Price and percent change at one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionEntry {
    /// Price resolved at the horizon.
    pub price: Decimal,
    /// Percent change against the base price; `None` if the base price is zero.
    pub percent_change: Option<Decimal>,
}

impl AttributionEntry {
    /// Build an entry for `price` relative to `base`.
    #[must_use]
    pub fn against(price: Decimal, base: Decimal) -> Self {
        Self {
            price,
            percent_change: percent_change(price, base),
        }
    }
}

/// Mapping from horizon label to [`AttributionEntry`].
///
/// Behavior:
/// - A label is present only if its horizon was resolved; there are no
///   placeholder entries.
/// - Every entry was computed against the series of a single resolution tier,
///   recorded in `tier`. An empty result (no data in any tier) has no tier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributionResult {
    /// Resolution tier that produced the entries.
    pub tier: Option<Resolution>,
    /// Sample the reference instant was aligned to.
    pub base: Option<PriceSample>,
    /// Resolved horizons keyed by label.
    pub entries: BTreeMap<String, AttributionEntry>,
}

impl AttributionResult {
    /// The terminal "no data available" result.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start a result for a tier whose base instant resolved to `base`.
    #[must_use]
    pub const fn for_tier(tier: Resolution, base: PriceSample) -> Self {
        Self {
            tier: Some(tier),
            base: Some(base),
            entries: BTreeMap::new(),
        }
    }

    /// Record an entry for `label`, replacing any previous value.
    pub fn insert(&mut self, label: impl Into<String>, entry: AttributionEntry) {
        self.entries.insert(label.into(), entry);
    }

    /// Look up an entry by label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&AttributionEntry> {
        self.entries.get(label)
    }

    /// Number of resolved horizons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no horizon resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributionEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
