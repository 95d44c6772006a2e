//! Price and percent change at each forward horizon.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use tidemark_types::{
    Anchor, AttributionEntry, AttributionResult, HorizonOffset, HorizonSpec, PriceSample,
    PriceSeries, Resolution,
};

use super::align;

/// The reference instant has no representable price in this series.
///
/// This is a tier-local signal: the controller converts it into a fallback to
/// the next tier or into an empty result, never into a caller-visible error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("reference instant not covered by the {0} series")]
pub struct BaseUnresolved(pub Resolution);

/// Alignment options for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonOptions {
    /// How the reference instant is anchored before alignment.
    pub anchor: Anchor,
    /// Timezone whose calendar days define end of day and day anchoring.
    pub tz: Tz,
}

impl Default for HorizonOptions {
    fn default() -> Self {
        Self {
            anchor: Anchor::Instant,
            tz: Tz::UTC,
        }
    }
}

/// Apply `anchor` to `base_time`.
///
/// Returns `None` only when day anchoring finds no valid local minute on that day.
#[must_use]
pub fn anchored(base_time: DateTime<Utc>, opts: HorizonOptions) -> Option<DateTime<Utc>> {
    match opts.anchor {
        Anchor::Instant => Some(base_time),
        Anchor::StartOfDay => align::start_of_day(base_time, opts.tz),
    }
}

/// Compute price and percent change for each horizon against `series`.
///
/// Behavior:
/// - The base price is resolved once from the (anchored) reference instant.
/// - Fixed offsets target `reference + offset`; end of day targets the last
///   sample on the reference's calendar day. Both resolve through
///   [`align::resolve`], so targets past the series end take the latest price.
/// - A horizon that does not resolve is omitted; partial results are valid.
/// - A zero base price yields entries with no percent change.
///
/// # Errors
/// Returns [`BaseUnresolved`] when the reference instant precedes the series
/// or the series is empty.
pub fn compute(
    series: &PriceSeries,
    base_time: DateTime<Utc>,
    horizons: &[HorizonSpec],
    opts: HorizonOptions,
) -> Result<AttributionResult, BaseUnresolved> {
    let unresolved = BaseUnresolved(series.resolution());
    let reference = anchored(base_time, opts).ok_or(unresolved)?;
    let base = *align::resolve(series, reference).ok_or(unresolved)?;

    let mut out = AttributionResult::for_tier(series.resolution(), base);
    for h in horizons {
        if let Some(sample) = target_sample(series, reference, h.offset, opts.tz) {
            out.insert(h.label.clone(), AttributionEntry::against(sample.price, base.price));
        }
    }
    Ok(out)
}

fn target_sample(
    series: &PriceSeries,
    reference: DateTime<Utc>,
    offset: HorizonOffset,
    tz: Tz,
) -> Option<&PriceSample> {
    match offset {
        HorizonOffset::Fixed(span) => {
            let delta = TimeDelta::from_std(span).ok()?;
            let target = reference.checked_add_signed(delta)?;
            align::resolve(series, target)
        }
        HorizonOffset::SameCalendarDay => {
            let day = align::local_date(reference, tz);
            let close = align::last_on_day(series, day, tz)?;
            align::resolve(series, close.ts)
        }
    }
}
