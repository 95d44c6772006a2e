//! Wire types for the `/v8/finance/chart/{symbol}` response.
//!
//! Only the fields needed to build a close-price series are modelled; serde
//! ignores the rest.

use serde::{Deserialize, Serialize};

/// Top-level chart document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    /// The single `chart` envelope Yahoo wraps everything in.
    pub chart: ChartEnvelope,
}

/// Result list plus optional chart-level error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartEnvelope {
    /// One entry per requested symbol; `null` when the request failed.
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    /// Chart-level error, e.g. `{"code": "Not Found", "description": "No data found, symbol may be delisted"}`.
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// Chart-level error object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartError {
    /// Short code such as `"Not Found"` or `"Bad Request"`.
    #[serde(default)]
    pub code: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ChartError {
    /// Whether this error means the symbol simply has no data.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        let looks = |s: &str| {
            let m = s.to_ascii_lowercase();
            m.contains("not found") || m.contains("no data")
        };
        looks(&self.code) || self.description.as_deref().is_some_and(looks)
    }
}

/// Bars for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    /// Bar timestamps in epoch seconds. Absent when the range holds no bars.
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    /// Per-bar price arrays aligned with `timestamp`.
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
    #[serde(default)]
    pub adjclose: Option<Vec<AdjCloseBlock>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct QuoteBlock {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct AdjCloseBlock {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

impl ChartResponse {
    /// The document Yahoo would send for an unknown symbol.
    #[must_use]
    pub fn not_found(symbol: &str) -> Self {
        Self {
            chart: ChartEnvelope {
                result: None,
                error: Some(ChartError {
                    code: "Not Found".into(),
                    description: Some(format!("No data found, symbol may be delisted: {symbol}")),
                }),
            },
        }
    }
}
