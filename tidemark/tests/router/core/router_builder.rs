use std::sync::Arc;
use std::time::Duration;

use crate::helpers::{AAPL, dt, series};
use tidemark::{
    CacheConfig, HorizonSpec, QuotaConfig, Resolution, Tidemark, TidemarkError, TierConfig,
};
use tidemark_mock::{DynamicMockProvider, MockBehavior, MockProvider};

#[test]
fn build_requires_a_provider() {
    let err = Tidemark::builder().build().err().unwrap();
    assert!(matches!(err, TidemarkError::InvalidArg(_)));
}

#[test]
fn build_rejects_invalid_tiers() {
    let p = Arc::new(MockProvider::new());

    let err = Tidemark::builder()
        .with_provider(p.clone())
        .tiers(vec![])
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, TidemarkError::InvalidArg(_)));

    let mut no_horizons = TierConfig::fine();
    no_horizons.horizons.clear();
    let err = Tidemark::builder()
        .with_provider(p.clone())
        .tiers(vec![no_horizons])
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, TidemarkError::InvalidArg(_)));

    let mut dup = TierConfig::coarse();
    dup.horizons
        .push(HorizonSpec::fixed("1d", Duration::from_secs(3_600)));
    let err = Tidemark::builder()
        .with_provider(p.clone())
        .tiers(vec![dup])
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, TidemarkError::InvalidArg(m) if m.contains("1d")));

    let err = Tidemark::builder()
        .with_provider(p)
        .max_concurrency(0)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, TidemarkError::InvalidArg(_)));
}

#[tokio::test]
async fn single_coarse_tier_skips_intraday_entirely() {
    let (p, ctl) = DynamicMockProvider::new_with_controller("dyn");
    ctl.set_behavior(
        AAPL,
        Resolution::Coarse,
        MockBehavior::Return(series(
            Resolution::Coarse,
            &[(dt(2024, 6, 3, 0, 0), "10"), (dt(2024, 6, 4, 0, 0), "11")],
        )),
    )
    .await;
    let tm = Tidemark::builder()
        .with_provider(p)
        .tiers(vec![TierConfig::coarse()])
        .build()
        .unwrap();
    let out = tm.attribute(AAPL, dt(2024, 6, 3, 14, 0)).await.unwrap();

    assert_eq!(out.tier, Some(Resolution::Coarse));
    assert_eq!(ctl.calls_at(Resolution::Fine).await, 0);
    let req = ctl.calls().await[0].request;
    assert_eq!(req.lookback, Duration::from_secs(365 * 86_400));
}

#[tokio::test]
async fn cached_engine_fetches_each_tier_once() {
    let (p, ctl) = DynamicMockProvider::new_with_controller("dyn");
    ctl.set_behavior(
        AAPL,
        Resolution::Fine,
        MockBehavior::Return(series(
            Resolution::Fine,
            &[(dt(2024, 6, 3, 14, 0), "10"), (dt(2024, 6, 3, 15, 0), "11")],
        )),
    )
    .await;
    let tm = Tidemark::builder()
        .with_provider(p)
        .cache(CacheConfig::default())
        .quota(QuotaConfig {
            limit: 1,
            window: Duration::from_secs(60),
        })
        .build()
        .unwrap();

    for _ in 0..3 {
        tm.attribute(AAPL, dt(2024, 6, 3, 14, 0)).await.unwrap();
    }
    assert_eq!(ctl.calls().await.len(), 1);
    assert_eq!(tm.provider_name(), "dyn");
}

#[test]
fn config_exposes_defaults() {
    let tm = Tidemark::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .max_concurrency(8)
        .build()
        .unwrap();
    assert_eq!(tm.config().max_concurrency, 8);
    assert_eq!(tm.config().tiers.len(), 2);
    assert_eq!(tm.config().eod_timezone, chrono_tz::Tz::UTC);
}
