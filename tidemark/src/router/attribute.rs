use chrono::{DateTime, Utc};
use tidemark_core::timeseries::horizon::{HorizonOptions, anchored, compute};
use tidemark_core::{
    AttributionReport, AttributionResult, PriceSeries, Resolution, TidemarkError, TierConfig,
    estimate_step_seconds, is_subdaily,
};

use crate::Tidemark;
use crate::router::util::{collapse_tier_errors, tag_err};

const DAY_SECONDS: i64 = 86_400;

/// Outcome of a single tier attempt.
enum TierOutcome {
    Succeeded(AttributionResult),
    FetchFailed(TidemarkError),
    /// Empty series, reference outside coverage, or unresolvable base.
    NoData,
}

#[derive(Default)]
struct TierWalk {
    result: Option<AttributionResult>,
    attempts: usize,
    fetch_failures: Vec<TidemarkError>,
    warnings: Vec<TidemarkError>,
}

impl TierWalk {
    fn finish(self) -> Result<(AttributionResult, Vec<TidemarkError>), TidemarkError> {
        if let Some(result) = self.result {
            return Ok((result, self.warnings));
        }
        if self.attempts > 0
            && self.fetch_failures.len() == self.attempts
            && let Some(e) = collapse_tier_errors(self.fetch_failures)
        {
            return Err(e);
        }
        Ok((AttributionResult::empty(), self.warnings))
    }
}

impl Tidemark {
    /// Attribute price movement after `base_time` for `symbol`.
    ///
    /// Behavior:
    /// - Tiers are tried in configured order; the first tier whose series
    ///   covers the (anchored) reference instant produces the whole result.
    ///   Entries are never mixed across tiers.
    /// - A tier whose fetch fails, returns no samples, or does not cover the
    ///   reference instant is skipped in favor of the next one.
    /// - When no tier yields a result the outcome is an empty
    ///   [`AttributionResult`], unless every tier's fetch failed.
    ///
    /// # Errors
    /// Returns `AllTiersFailed` with one error per tier, in tier order, when
    /// every fetch failed. Partial provider failures are not errors.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tidemark::router::attribute", skip(self))
    )]
    pub async fn attribute(
        &self,
        symbol: &str,
        base_time: DateTime<Utc>,
    ) -> Result<AttributionResult, TidemarkError> {
        let (result, _) = self.walk_tiers(symbol, base_time).await.finish()?;
        Ok(result)
    }

    /// Like [`attribute`](Self::attribute), but also reports non-fatal issues.
    ///
    /// Warnings include tier fetch failures that a later tier recovered from
    /// and fine-resolution series whose observed cadence is daily.
    ///
    /// # Errors
    /// Same as [`attribute`](Self::attribute).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tidemark::router::attribute_with_report", skip(self))
    )]
    pub async fn attribute_with_report(
        &self,
        symbol: &str,
        base_time: DateTime<Utc>,
    ) -> Result<AttributionReport, TidemarkError> {
        let (result, warnings) = self.walk_tiers(symbol, base_time).await.finish()?;
        Ok(AttributionReport {
            symbol: symbol.to_string(),
            base_time,
            result,
            warnings,
        })
    }

    async fn walk_tiers(&self, symbol: &str, base_time: DateTime<Utc>) -> TierWalk {
        let mut walk = TierWalk::default();
        for tier in &self.cfg.tiers {
            walk.attempts += 1;
            match self
                .try_tier(symbol, base_time, tier, &mut walk.warnings)
                .await
            {
                TierOutcome::Succeeded(result) => {
                    walk.result = Some(result);
                    break;
                }
                TierOutcome::FetchFailed(e) => {
                    walk.warnings.push(e.clone());
                    walk.fetch_failures.push(e);
                }
                TierOutcome::NoData => {}
            }
        }
        #[cfg(feature = "tracing")]
        if walk.result.is_none() {
            tracing::info!(
                symbol,
                attempts = walk.attempts,
                failed = walk.fetch_failures.len(),
                "no tier produced an attribution"
            );
        }
        walk
    }

    async fn try_tier(
        &self,
        symbol: &str,
        base_time: DateTime<Utc>,
        tier: &TierConfig,
        warnings: &mut Vec<TidemarkError>,
    ) -> TierOutcome {
        let opts = HorizonOptions {
            anchor: tier.anchor,
            tz: self.cfg.eod_timezone,
        };
        let series = match self.provider.fetch(symbol, tier.request()).await {
            Ok(s) => s,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    symbol,
                    tier = %tier.resolution,
                    error = %e,
                    "tier fetch failed; falling back"
                );
                return TierOutcome::FetchFailed(tag_err(self.provider.name(), e));
            }
        };
        warnings.extend(series_warnings(symbol, tier, &series));

        let Some(coverage) = series.coverage() else {
            #[cfg(feature = "tracing")]
            tracing::debug!(symbol, tier = %tier.resolution, "empty series; falling back");
            return TierOutcome::NoData;
        };
        let Some(reference) = anchored(base_time, opts) else {
            return TierOutcome::NoData;
        };
        if !coverage.contains(reference) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                symbol,
                tier = %tier.resolution,
                reference = %reference,
                first = %coverage.start,
                last = %coverage.end,
                "reference outside series coverage; falling back"
            );
            return TierOutcome::NoData;
        }

        match compute(&series, base_time, &tier.horizons, opts) {
            Ok(mut result) => {
                result.tier = Some(tier.resolution);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    symbol,
                    tier = %tier.resolution,
                    horizons = result.len(),
                    "tier succeeded"
                );
                TierOutcome::Succeeded(result)
            }
            Err(_unresolved) => TierOutcome::NoData,
        }
    }
}

/// Non-fatal observations about a fetched series.
fn series_warnings(symbol: &str, tier: &TierConfig, series: &PriceSeries) -> Vec<TidemarkError> {
    let mut out = Vec::new();
    if series.resolution() != tier.resolution {
        out.push(TidemarkError::Data(format!(
            "{symbol}: provider returned a {} series for a {} request",
            series.resolution(),
            tier.resolution
        )));
    }
    if tier.resolution == Resolution::Fine {
        let samples = series.samples();
        let daily_step = estimate_step_seconds(samples).is_some_and(|s| s >= DAY_SECONDS);
        if daily_step && !is_subdaily(samples) {
            out.push(TidemarkError::Data(format!(
                "{symbol}: fine series has a daily cadence"
            )));
        }
    }
    out
}
