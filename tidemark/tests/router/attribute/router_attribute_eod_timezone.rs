use std::sync::Arc;

use crate::helpers::{AAPL, dt, px, series};
use tidemark::{Resolution, Tidemark};
use tidemark_mock::{DynamicMockProvider, MockBehavior};

async fn provider() -> Arc<dyn tidemark::PriceSeriesProvider> {
    let (p, ctl) = DynamicMockProvider::new_with_controller("dyn");
    ctl.set_behavior(
        AAPL,
        Resolution::Fine,
        MockBehavior::Return(series(
            Resolution::Fine,
            &[
                (dt(2024, 3, 4, 19, 0), "10"),
                (dt(2024, 3, 4, 20, 0), "11"),
                // 22:00 on March 4th in New York.
                (dt(2024, 3, 5, 3, 0), "12"),
            ],
        )),
    )
    .await;
    p
}

#[tokio::test]
async fn eod_defaults_to_utc_days() {
    let tm = Tidemark::builder()
        .with_provider(provider().await)
        .build()
        .unwrap();
    let out = tm.attribute(AAPL, dt(2024, 3, 4, 19, 0)).await.unwrap();
    assert_eq!(out.get("EOD").unwrap().price, px("11"));
}

#[tokio::test]
async fn eod_follows_configured_timezone() {
    let tm = Tidemark::builder()
        .with_provider(provider().await)
        .eod_timezone(chrono_tz::America::New_York)
        .build()
        .unwrap();
    let out = tm.attribute(AAPL, dt(2024, 3, 4, 19, 0)).await.unwrap();
    assert_eq!(out.get("EOD").unwrap().price, px("12"));
    assert_eq!(out.get("EOD").unwrap().percent_change, Some(px("20")));
}

#[tokio::test]
async fn coarse_tier_survives_midnight_dst_gap() {
    // Daily bars stamped 03:00Z, i.e. local midnight in Sao Paulo before the
    // 2018-11-04 spring-forward, and 01:00 local after it.
    let (p, ctl) = DynamicMockProvider::new_with_controller("dyn");
    let bars: Vec<_> = (1..=12)
        .map(|d| (dt(2018, 11, d, 3, 0), format!("{}", 100 + d)))
        .collect();
    let points: Vec<_> = bars.iter().map(|(t, p)| (*t, p.as_str())).collect();
    ctl.set_behavior(
        AAPL,
        Resolution::Coarse,
        MockBehavior::Return(series(Resolution::Coarse, &points)),
    )
    .await;
    let tm = Tidemark::builder()
        .with_provider(p)
        .eod_timezone(chrono_tz::America::Sao_Paulo)
        .build()
        .unwrap();

    // Local midnight does not exist on this day; the day starts at 01:00 -02.
    let out = tm.attribute(AAPL, dt(2018, 11, 4, 15, 0)).await.unwrap();
    assert_eq!(out.tier, Some(Resolution::Coarse));
    assert_eq!(out.len(), 2);
    assert_eq!(out.base.unwrap().price, px("104"));
    assert_eq!(out.get("1d").unwrap().price, px("105"));
    assert_eq!(out.get("1w").unwrap().price, px("111"));

    let next = tm.attribute(AAPL, dt(2018, 11, 5, 15, 0)).await.unwrap();
    assert_eq!(next.tier, Some(Resolution::Coarse));
    assert_eq!(next.base.unwrap().price, px("105"));
}
