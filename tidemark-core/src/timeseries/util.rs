//! Shared helpers for normalizing raw provider samples.

use chrono::DateTime;
use rust_decimal::Decimal;
use tidemark_types::{PriceSample, TidemarkError};

/// Pair epoch-second timestamps with optional closes into price samples.
///
/// Missing, non-finite, and negative closes are dropped; they are gaps in the
/// provider's data, not errors. The output keeps input order.
///
/// # Errors
/// Returns `TidemarkError::Data` if the two slices differ in length or a
/// timestamp is out of range.
pub fn samples_from_closes(
    timestamps: &[i64],
    closes: &[Option<f64>],
) -> Result<Vec<PriceSample>, TidemarkError> {
    if timestamps.len() != closes.len() {
        return Err(TidemarkError::Data(format!(
            "{} timestamps but {} closes",
            timestamps.len(),
            closes.len()
        )));
    }
    let mut out = Vec::with_capacity(timestamps.len());
    for (&ts, close) in timestamps.iter().zip(closes) {
        let Some(price) = close.and_then(price_from_f64) else {
            continue;
        };
        let ts = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| TidemarkError::Data(format!("timestamp out of range: {ts}")))?;
        out.push(PriceSample::new(ts, price));
    }
    Ok(out)
}

fn price_from_f64(v: f64) -> Option<Decimal> {
    if !v.is_finite() || v < 0.0 {
        return None;
    }
    Decimal::from_f64_retain(v)
}

/// Remove samples identical to their predecessor (same instant and price).
///
/// Same-instant samples with different prices are kept; the resolver picks the
/// first of them.
pub fn dedup_exact(samples: &mut Vec<PriceSample>) {
    samples.dedup();
}
