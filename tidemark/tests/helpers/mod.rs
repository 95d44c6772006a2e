use std::sync::Arc;

use rust_decimal::Decimal;
use tidemark::{PriceSample, PriceSeries, PriceSeriesProvider, Resolution, Tidemark};

/// Common symbol constants used across tests.
pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";
pub const TSLA: &str = "TSLA";
#[allow(dead_code)]
pub const FAIL: &str = "FAIL";
#[allow(dead_code)]
pub const UNKNOWN: &str = "ZZZZ";

/// Construct a UTC `DateTime` from components for readability in tests.
pub const fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> chrono::DateTime<chrono::Utc> {
    let date = chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date");
    let naive = date.and_hms_opt(hh, mm, 0).expect("invalid time components");
    chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(naive, chrono::Utc)
}

pub fn px(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Build a series from `(instant, price)` pairs already in time order.
pub fn series(
    resolution: Resolution,
    points: &[(chrono::DateTime<chrono::Utc>, &str)],
) -> PriceSeries {
    PriceSeries::new(
        resolution,
        points
            .iter()
            .map(|&(ts, p)| PriceSample::new(ts, px(p)))
            .collect(),
    )
    .unwrap()
}

/// Engine with default tiers over `provider`.
pub fn engine(provider: Arc<dyn PriceSeriesProvider>) -> Tidemark {
    Tidemark::builder()
        .with_provider(provider)
        .build()
        .expect("valid engine")
}

/// Engine over the fixture-backed mock provider.
#[allow(dead_code)]
pub fn fixture_engine() -> Tidemark {
    engine(Arc::new(tidemark_mock::MockProvider::new()))
}
