#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use tidemark_core::TidemarkError;

use crate::chart::ChartResponse;

pub(crate) const PROVIDER: &str = "tidemark-yahoo";

/// Default chart host.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Chart endpoint abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait YahooChart: Send + Sync {
    /// Fetch the chart document for `symbol` with Yahoo's `range` and `interval` codes.
    ///
    /// An unknown symbol is not an error: implementations return a document
    /// carrying a not-found chart error instead.
    async fn chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResponse, TidemarkError>;
}

/// Real adapter backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base_url: String,
}

impl RealAdapter {
    /// Adapter against the public Yahoo host with a browser user agent.
    #[must_use]
    pub fn new_default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Adapter against another host (a proxy or a local mock server).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self::new(http, base_url)
    }

    /// Adapter from an existing client.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, symbol: &str) -> String {
        format!("{}/v8/finance/chart/{symbol}", self.base_url)
    }
}

fn transport_err(e: &reqwest::Error, context: &str) -> TidemarkError {
    if e.is_timeout() {
        TidemarkError::connector(PROVIDER, format!("timeout: {context}"))
    } else if e.is_decode() {
        TidemarkError::connector(PROVIDER, format!("malformed chart for {context}: {e}"))
    } else {
        TidemarkError::connector(PROVIDER, format!("{context}: {e}"))
    }
}

#[async_trait]
impl YahooChart for RealAdapter {
    async fn chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResponse, TidemarkError> {
        let context = format!("chart for {symbol}");
        let resp = self
            .http
            .get(self.url(symbol))
            .query(&[("range", range), ("interval", interval)])
            .send()
            .await
            .map_err(|e| transport_err(&e, &context))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(ChartResponse::not_found(symbol));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TidemarkError::connector(
                PROVIDER,
                format!("rate limit: {context}"),
            ));
        }
        if !status.is_success() {
            return Err(TidemarkError::connector(
                PROVIDER,
                format!("status {}: {context}", status.as_u16()),
            ));
        }
        resp.json::<ChartResponse>()
            .await
            .map_err(|e| transport_err(&e, &context))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YahooChart {
    /// Build a `YahooChart` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YahooChart>
    where
        F: Send
            + Sync
            + 'static
            + Fn(String, String, String) -> Result<ChartResponse, TidemarkError>,
    {
        struct FnChart<F>(F);
        #[async_trait]
        impl<F> YahooChart for FnChart<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(String, String, String) -> Result<ChartResponse, TidemarkError>,
        {
            async fn chart(
                &self,
                symbol: &str,
                range: &str,
                interval: &str,
            ) -> Result<ChartResponse, TidemarkError> {
                (self.0)(symbol.to_string(), range.to_string(), interval.to_string())
            }
        }
        Arc::new(FnChart(f))
    }
}
