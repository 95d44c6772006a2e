mod common;
use common::{demo_instant, get_provider};
use tidemark::Tidemark;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs tier fallbacks when built with `--features tracing`.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. Build the engine around a provider (mock in CI when TIDEMARK_EXAMPLES_USE_MOCK is set).
    let tm = Tidemark::builder()
        .with_provider(get_provider())
        .eod_timezone(chrono_tz::America::New_York)
        .build()?;

    // 2. Attribute price movement after a headline.
    let published = demo_instant();
    println!("Attributing AAPL after {published}...");
    let report = tm.attribute_with_report("AAPL", published).await?;

    // 3. Print the result.
    match report.result.tier {
        Some(tier) => println!("resolved from the {tier} tier"),
        None => println!("no price data available"),
    }
    for (label, entry) in report.result.iter() {
        match entry.percent_change {
            Some(pct) => println!("{label:>4}: {} ({}%)", entry.price, pct.round_dp(2)),
            None => println!("{label:>4}: {} (n/a)", entry.price),
        }
    }
    for w in &report.warnings {
        println!("warning: {w}");
    }

    Ok(())
}
