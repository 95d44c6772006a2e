use std::sync::Arc;

use tidemark::PriceSeriesProvider;

#[must_use]
pub fn get_provider() -> Arc<dyn PriceSeriesProvider> {
    if std::env::var("TIDEMARK_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Provider for CI) ---");
        Arc::new(tidemark_mock::MockProvider::new())
    } else {
        Arc::new(tidemark_yahoo::YahooProvider::new())
    }
}

/// Reference instant for the demos: fixed under the mock, recent otherwise.
#[must_use]
pub fn demo_instant() -> chrono::DateTime<chrono::Utc> {
    if std::env::var("TIDEMARK_EXAMPLES_USE_MOCK").is_ok() {
        chrono::DateTime::parse_from_rfc3339("2024-06-03T14:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&chrono::Utc)
    } else {
        chrono::Utc::now() - chrono::TimeDelta::days(2)
    }
}
