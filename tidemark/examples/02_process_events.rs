mod common;
use common::{demo_instant, get_provider};
use tidemark::{CacheConfig, NewsEvent, Tidemark};
use tidemark_mock::MemorySink;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Cache series so events for the same symbol share one fetch per tier.
    let tm = Tidemark::builder()
        .with_provider(get_provider())
        .cache(CacheConfig::default())
        .max_concurrency(2)
        .build()?;

    // 2. A handful of headlines, as an event-discovery collaborator would supply them.
    let t = demo_instant();
    let events = vec![
        NewsEvent::new("evt-1", "AAPL", t).with_headline("Apple announces new product line"),
        NewsEvent::new("evt-2", "AAPL", t + chrono::TimeDelta::minutes(45)),
        NewsEvent::new("evt-3", "MSFT", t),
        NewsEvent::new("evt-4", "NOSUCHTICKER", t),
    ];

    // 3. Attribute and store; re-running is idempotent.
    let sink = MemorySink::new();
    let first = tm.process_events(&events, &sink).await;
    let second = tm.process_events(&events, &sink).await;

    println!("first run:  {first:#?}");
    println!(
        "second run: inserted={} skipped={}",
        second.inserted, second.skipped
    );
    for rec in sink.records().await {
        println!(
            "{} {:>4} {} {:?}",
            rec.event_id, rec.horizon, rec.price, rec.percent_change
        );
    }

    Ok(())
}
