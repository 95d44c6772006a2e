//! Cadence inference over irregular price samples.

use std::collections::BTreeMap;

use tidemark_types::PriceSample;

const DAY_SECONDS: i64 = 86_400;

/// Gaps in seconds between consecutive distinct timestamps, in time order.
fn step_gaps(samples: &[PriceSample]) -> Vec<i64> {
    let mut secs: Vec<i64> = samples.iter().map(|s| s.ts.timestamp()).collect();
    secs.sort_unstable();
    secs.dedup();
    secs.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Typical spacing of the samples, in seconds.
///
/// The most frequent gap wins; when several gaps tie for most frequent, the
/// lower median of all gaps is used instead.
///
/// ```
/// use chrono::{DateTime, Utc};
/// use rust_decimal::Decimal;
/// use tidemark_core::{PriceSample, estimate_step_seconds};
///
/// fn t(sec: i64) -> DateTime<Utc> { DateTime::from_timestamp(sec, 0).unwrap() }
/// let mk = |ts: i64| PriceSample::new(t(ts), Decimal::ONE);
///
/// // Gaps 60,60,60,120,180: 60 is the clear favourite.
/// let samples = vec![mk(0), mk(60), mk(120), mk(180), mk(300), mk(480)];
/// assert_eq!(estimate_step_seconds(&samples), Some(60));
///
/// // Gaps 60,60,120,120: tie, lower median is 60.
/// let samples = vec![mk(0), mk(60), mk(120), mk(240), mk(360)];
/// assert_eq!(estimate_step_seconds(&samples), Some(60));
/// ```
///
/// Input order and repeated timestamps do not matter. Returns `None` with
/// fewer than two distinct timestamps.
#[must_use]
pub fn estimate_step_seconds(samples: &[PriceSample]) -> Option<i64> {
    let mut gaps = step_gaps(samples);
    if gaps.is_empty() {
        return None;
    }

    let mut tally: BTreeMap<i64, usize> = BTreeMap::new();
    for &g in &gaps {
        *tally.entry(g).or_default() += 1;
    }
    let top = tally.values().copied().max().unwrap_or(0);
    let mut leaders = tally.iter().filter(|&(_, &n)| n == top).map(|(&g, _)| g);
    if let (Some(mode), None) = (leaders.next(), leaders.next()) {
        return Some(mode);
    }

    gaps.sort_unstable();
    gaps.get((gaps.len() - 1) / 2).copied()
}

/// True when most gaps are shorter than a day.
///
/// Needs at least three sub-day gaps, making up at least 60% of all gaps.
#[must_use]
pub fn is_subdaily(samples: &[PriceSample]) -> bool {
    let gaps = step_gaps(samples);
    let short = gaps.iter().filter(|&&g| g < DAY_SECONDS).count();
    short >= 3 && short * 5 >= gaps.len() * 3
}
