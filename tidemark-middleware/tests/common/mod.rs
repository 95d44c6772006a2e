use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::DateTime;
use rust_decimal::Decimal;
use tidemark_core::{PriceSample, PriceSeries, PriceSeriesProvider, TidemarkError};

/// Provider that counts fetches. `EMPTY` yields an empty series, `ERR` fails,
/// everything else returns a one-sample series.
pub fn counting_provider() -> (Arc<dyn PriceSeriesProvider>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let p = <dyn PriceSeriesProvider>::from_fn("counting", move |symbol, req| {
        seen.fetch_add(1, Ordering::SeqCst);
        match symbol {
            "EMPTY" => Ok(PriceSeries::empty(req.resolution)),
            "ERR" => Err(TidemarkError::connector("counting", "boom")),
            _ => PriceSeries::new(
                req.resolution,
                vec![PriceSample::new(
                    DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
                    Decimal::from(42),
                )],
            ),
        }
    });
    (p, calls)
}

pub fn count(calls: &AtomicUsize) -> usize {
    calls.load(Ordering::SeqCst)
}
