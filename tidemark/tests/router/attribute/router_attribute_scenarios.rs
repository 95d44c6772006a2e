use std::sync::Arc;

use crate::helpers::{AAPL, MSFT, TSLA, UNKNOWN, dt, engine, fixture_engine, px, series};
use tidemark::Resolution;
use tidemark_core::percent_change;
use tidemark_mock::{DynamicMockProvider, MockBehavior};

#[tokio::test]
async fn fine_series_resolves_every_horizon() {
    let tm = fixture_engine();
    let out = tm.attribute(AAPL, dt(2024, 6, 3, 14, 0)).await.unwrap();

    assert_eq!(out.tier, Some(Resolution::Fine));
    assert_eq!(out.len(), 4);
    let base = out.base.unwrap();
    assert_eq!(base.price, px("190.50"));

    let expect = [
        ("1h", "191.20"),
        ("4h", "192.40"),
        ("EOD", "193.00"),
        ("1w", "196.00"),
    ];
    for (label, price) in expect {
        let e = out.get(label).unwrap_or_else(|| panic!("{label} missing"));
        assert_eq!(e.price, px(price), "{label}");
        assert_eq!(
            e.percent_change,
            percent_change(px(price), base.price),
            "{label}"
        );
    }
}

#[tokio::test]
async fn base_before_fine_series_falls_back_to_coarse() {
    let tm = fixture_engine();
    let out = tm.attribute(TSLA, dt(2024, 6, 3, 14, 0)).await.unwrap();

    assert_eq!(out.tier, Some(Resolution::Coarse));
    let labels: Vec<_> = out.iter().map(|(l, _)| l).collect();
    assert_eq!(labels, vec!["1d", "1w"]);
    assert_eq!(out.base.unwrap().price, px("178.00"));
    assert_eq!(out.get("1d").unwrap().price, px("174.00"));
    assert_eq!(out.get("1w").unwrap().price, px("173.00"));
}

#[tokio::test]
async fn week_horizon_past_series_end_takes_latest() {
    let (p, ctl) = DynamicMockProvider::new_with_controller("dyn");
    ctl.set_behavior(
        AAPL,
        Resolution::Fine,
        MockBehavior::Return(series(
            Resolution::Fine,
            &[
                (dt(2024, 6, 3, 14, 0), "100"),
                (dt(2024, 6, 3, 15, 0), "102"),
                (dt(2024, 6, 3, 18, 0), "104"),
                (dt(2024, 6, 4, 15, 0), "110"),
            ],
        )),
    )
    .await;
    let tm = engine(p);
    let out = tm.attribute(AAPL, dt(2024, 6, 3, 14, 0)).await.unwrap();

    let week = out.get("1w").expect("1w is resolved, not omitted");
    assert_eq!(week.price, px("110"));
    assert_eq!(week.percent_change, Some(px("10")));
    assert_eq!(out.get("EOD").unwrap().price, px("104"));
}

#[tokio::test]
async fn no_data_in_any_tier_is_an_empty_result() {
    let tm = fixture_engine();
    let out = tm.attribute(UNKNOWN, dt(2024, 6, 3, 14, 0)).await.unwrap();
    assert!(out.is_empty());
    assert!(out.tier.is_none());
    assert!(out.base.is_none());
}

#[tokio::test]
async fn zero_base_price_omits_percent_change() {
    let (p, ctl) = DynamicMockProvider::new_with_controller("dyn");
    ctl.set_behavior(
        AAPL,
        Resolution::Fine,
        MockBehavior::Return(series(
            Resolution::Fine,
            &[
                (dt(2024, 6, 3, 14, 0), "0"),
                (dt(2024, 6, 3, 15, 0), "5"),
                (dt(2024, 6, 3, 19, 0), "6"),
            ],
        )),
    )
    .await;
    let out = engine(p).attribute(AAPL, dt(2024, 6, 3, 14, 0)).await.unwrap();

    assert_eq!(out.len(), 4);
    for (label, e) in out.iter() {
        assert!(e.percent_change.is_none(), "{label} carries a percent change");
    }
    assert_eq!(out.get("1h").unwrap().price, px("5"));
}

#[tokio::test]
async fn repeated_attribution_is_identical() {
    let tm = fixture_engine();
    let t = dt(2024, 6, 3, 15, 17);
    let a = tm.attribute(AAPL, t).await.unwrap();
    let b = tm.attribute(AAPL, t).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn daily_only_symbol_uses_coarse_tier() {
    let tm = engine(Arc::new(tidemark_mock::MockProvider::new()));
    let out = tm.attribute(MSFT, dt(2024, 6, 3, 15, 0)).await.unwrap();
    assert_eq!(out.tier, Some(Resolution::Coarse));
    assert_eq!(out.base.unwrap().price, px("410.00"));
    assert_eq!(out.get("1d").unwrap().price, px("412.00"));
    assert_eq!(out.get("1w").unwrap().price, px("425.00"));
}
