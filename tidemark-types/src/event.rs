//! News events that drive attribution and the rows persisted for them.

use core::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::attribution::AttributionResult;

/// Identifier of the originating event (article id, URL hash, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub String);

impl EventId {
    /// Construct an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A timestamped headline about a traded security.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsEvent {
    /// Originating event identifier.
    pub id: EventId,
    /// Security symbol, e.g. "AAPL".
    pub symbol: String,
    /// Publication instant; the reference timestamp for attribution.
    pub published_at: DateTime<Utc>,
    /// Headline text, if known.
    pub headline: Option<String>,
    /// Source URL, if known.
    pub url: Option<String>,
}

impl NewsEvent {
    /// Minimal event with no headline metadata.
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, published_at: DateTime<Utc>) -> Self {
        Self {
            id: EventId::new(id),
            symbol: symbol.into(),
            published_at,
            headline: None,
            url: None,
        }
    }

    /// Attach a headline.
    #[must_use]
    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = Some(headline.into());
        self
    }

    /// Attach the source URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// One persisted row per resolved horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonRecord {
    /// Originating event.
    pub event_id: EventId,
    /// Security symbol.
    pub symbol: String,
    /// Horizon label, e.g. "1h".
    pub horizon: String,
    /// Price at the horizon.
    pub price: Decimal,
    /// Percent change against the base price, if defined.
    pub percent_change: Option<Decimal>,
}

impl HorizonRecord {
    /// Flatten an attribution result into one record per horizon label.
    #[must_use]
    pub fn from_result(event: &NewsEvent, result: &AttributionResult) -> Vec<Self> {
        result
            .iter()
            .map(|(label, entry)| Self {
                event_id: event.id.clone(),
                symbol: event.symbol.clone(),
                horizon: label.to_string(),
                price: entry.price,
                percent_change: entry.percent_change,
            })
            .collect()
    }
}
