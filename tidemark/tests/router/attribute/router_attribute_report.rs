use crate::helpers::{AAPL, dt, engine, fixture_engine, series};
use tidemark::{Resolution, TidemarkError};
use tidemark_mock::{DynamicMockProvider, MockBehavior};

#[tokio::test]
async fn clean_run_has_no_warnings() {
    let report = fixture_engine()
        .attribute_with_report(AAPL, dt(2024, 6, 3, 14, 0))
        .await
        .unwrap();
    assert_eq!(report.symbol, AAPL);
    assert_eq!(report.base_time, dt(2024, 6, 3, 14, 0));
    assert_eq!(report.result.len(), 4);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[tokio::test]
async fn recovered_fetch_failure_is_a_warning() {
    let (p, ctl) = DynamicMockProvider::new_with_controller("dyn");
    ctl.set_behavior(
        AAPL,
        Resolution::Fine,
        MockBehavior::Fail(TidemarkError::connector("dyn", "timeout")),
    )
    .await;
    ctl.set_behavior(
        AAPL,
        Resolution::Coarse,
        MockBehavior::Return(series(
            Resolution::Coarse,
            &[(dt(2024, 6, 3, 0, 0), "10"), (dt(2024, 6, 4, 0, 0), "11")],
        )),
    )
    .await;
    let report = engine(p)
        .attribute_with_report(AAPL, dt(2024, 6, 3, 14, 0))
        .await
        .unwrap();
    assert_eq!(report.result.tier, Some(Resolution::Coarse));
    assert_eq!(
        report.warnings,
        vec![TidemarkError::connector("dyn", "timeout")]
    );
}

#[tokio::test]
async fn daily_cadence_on_fine_tier_is_flagged() {
    let (p, ctl) = DynamicMockProvider::new_with_controller("dyn");
    ctl.set_behavior(
        AAPL,
        Resolution::Fine,
        MockBehavior::Return(series(
            Resolution::Fine,
            &[
                (dt(2024, 6, 3, 0, 0), "10"),
                (dt(2024, 6, 4, 0, 0), "11"),
                (dt(2024, 6, 5, 0, 0), "12"),
                (dt(2024, 6, 6, 0, 0), "13"),
                (dt(2024, 6, 7, 0, 0), "14"),
            ],
        )),
    )
    .await;
    let report = engine(p)
        .attribute_with_report(AAPL, dt(2024, 6, 3, 0, 0))
        .await
        .unwrap();
    assert_eq!(report.result.tier, Some(Resolution::Fine));
    assert!(
        report
            .warnings
            .iter()
            .any(|w| matches!(w, TidemarkError::Data(m) if m.contains("daily cadence")))
    );
}

#[tokio::test]
async fn report_propagates_total_failure() {
    let (p, ctl) = DynamicMockProvider::new_with_controller("dyn");
    for res in [Resolution::Fine, Resolution::Coarse] {
        ctl.set_behavior(AAPL, res, MockBehavior::Fail(TidemarkError::connector("dyn", "down")))
            .await;
    }
    let err = engine(p)
        .attribute_with_report(AAPL, dt(2024, 6, 3, 14, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, TidemarkError::AllTiersFailed(_)));
}
