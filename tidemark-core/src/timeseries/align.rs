//! Time alignment of a target instant onto an irregular price series.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use tidemark_types::{PriceSample, PriceSeries};

/// Resolve the sample that represents the price at or just after `target`.
///
/// Rules:
/// - Binary search for the first sample with `ts >= target`; with duplicate
///   timestamps the first of them wins. Prices are never interpolated.
/// - A target past the last sample resolves to the last sample
///   (fallback-to-latest).
/// - A target strictly before the first sample resolves to `None`; there is no
///   backward extrapolation.
/// - An empty series always resolves to `None`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
/// use tidemark_core::timeseries::align::resolve;
/// use tidemark_core::{PriceSample, PriceSeries, Resolution};
///
/// let t = |s| Utc.timestamp_opt(s, 0).unwrap();
/// let series = PriceSeries::new(
///     Resolution::Fine,
///     vec![
///         PriceSample::new(t(60), Decimal::from(10)),
///         PriceSample::new(t(120), Decimal::from(11)),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(resolve(&series, t(90)).unwrap().price, Decimal::from(11));
/// assert_eq!(resolve(&series, t(600)).unwrap().price, Decimal::from(11));
/// assert!(resolve(&series, t(0)).is_none());
/// ```
#[must_use]
pub fn resolve(series: &PriceSeries, target: DateTime<Utc>) -> Option<&PriceSample> {
    let samples = series.samples();
    let first = samples.first()?;
    if target < first.ts {
        return None;
    }
    let idx = samples.partition_point(|s| s.ts < target);
    samples.get(idx).or_else(|| samples.last())
}

/// The last sample whose calendar date in `tz` equals `day`.
#[must_use]
pub fn last_on_day(series: &PriceSeries, day: NaiveDate, tz: Tz) -> Option<&PriceSample> {
    let samples = series.samples();
    // Local dates are non-decreasing because timestamps are.
    let idx = samples.partition_point(|s| local_date(s.ts, tz) <= day);
    let candidate = samples.get(idx.checked_sub(1)?)?;
    (local_date(candidate.ts, tz) == day).then_some(candidate)
}

/// Start (in `tz`) of the calendar day containing `t`, as a UTC instant.
///
/// This is local midnight, or the first valid local minute after it when
/// midnight falls in a DST gap (e.g. `America/Sao_Paulo` on 2018-11-04, where
/// the day starts at 01:00 local). Returns `None` only if no minute of the
/// day exists locally.
#[must_use]
pub fn start_of_day(t: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
    const MINUTES_PER_DAY: i64 = 24 * 60;
    let midnight = local_date(t, tz).and_time(NaiveTime::MIN);
    (0..MINUTES_PER_DAY).find_map(|m| {
        tz.from_local_datetime(&(midnight + TimeDelta::minutes(m)))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    })
}

/// Calendar date of `t` in `tz`.
#[must_use]
pub fn local_date(t: DateTime<Utc>, tz: Tz) -> NaiveDate {
    t.with_timezone(&tz).date_naive()
}
