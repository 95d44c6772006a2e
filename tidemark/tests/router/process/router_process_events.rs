use std::sync::Arc;

use crate::helpers::{AAPL, FAIL, TSLA, UNKNOWN, dt};
use tidemark::{NewsEvent, Tidemark, TidemarkError};
use tidemark_mock::{MemorySink, MockProvider};

fn events() -> Vec<NewsEvent> {
    vec![
        NewsEvent::new("a-1", AAPL, dt(2024, 6, 3, 14, 0)).with_headline("Apple unveils"),
        NewsEvent::new("t-1", TSLA, dt(2024, 6, 3, 14, 0)),
        NewsEvent::new("z-1", UNKNOWN, dt(2024, 6, 3, 14, 0)),
        NewsEvent::new("f-1", FAIL, dt(2024, 6, 3, 14, 0)),
    ]
}

fn engine(concurrency: usize) -> Tidemark {
    Tidemark::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .max_concurrency(concurrency)
        .build()
        .unwrap()
}

#[tokio::test]
async fn batch_counts_every_outcome() {
    let sink = MemorySink::new();
    let report = engine(4).process_events(&events(), &sink).await;

    assert_eq!(report.processed, 4);
    assert_eq!(report.attributed, 2);
    assert_eq!(report.empty, 1);
    // 4 fine horizons for AAPL plus 2 coarse horizons for TSLA.
    assert_eq!(report.inserted, 6);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].event_id.as_str(), "f-1");
    assert!(matches!(
        report.failures[0].error,
        TidemarkError::AllTiersFailed(_)
    ));
    assert_eq!(sink.len().await, 6);
}

#[tokio::test]
async fn rerunning_a_batch_skips_existing_rows() {
    let sink = MemorySink::new();
    let tm = engine(2);
    tm.process_events(&events(), &sink).await;
    let again = tm.process_events(&events(), &sink).await;

    assert_eq!(again.inserted, 0);
    assert_eq!(again.skipped, 6);
    assert_eq!(sink.len().await, 6);
}

#[tokio::test]
async fn sink_failure_is_recorded_and_batch_continues() {
    let sink = MemorySink::new().failing_for(AAPL);
    let report = engine(4).process_events(&events(), &sink).await;

    assert_eq!(report.attributed, 1);
    assert_eq!(report.inserted, 2);
    let ids: Vec<_> = report
        .failures
        .iter()
        .map(|f| f.event_id.as_str())
        .collect();
    assert_eq!(ids, vec!["a-1", "f-1"]);
    assert!(matches!(
        report.failures[0].error,
        TidemarkError::Sink { .. }
    ));
}

#[tokio::test]
async fn concurrency_does_not_change_the_report() {
    let serial = engine(1)
        .process_events(&events(), &MemorySink::new())
        .await;
    let parallel = engine(16)
        .process_events(&events(), &MemorySink::new())
        .await;
    assert_eq!(serial, parallel);
}

#[tokio::test]
async fn empty_batch_is_an_empty_report() {
    let report = engine(4).process_events(&[], &MemorySink::new()).await;
    assert_eq!(report, tidemark::ProcessReport::default());
}
