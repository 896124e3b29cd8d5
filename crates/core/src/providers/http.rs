use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::config::ApiConfig;
use crate::errors::CoreError;
use crate::models::metrics::StockMetrics;
use crate::models::search::TickerSearchResult;
use crate::models::series::{HistoricalPoint, PredictionResponse};
use super::traits::StockDataProvider;

/// JSON-over-HTTP client for the dashboard backend.
///
/// - **Endpoints**: search, metrics, historical, prediction (all GET).
/// - **Auth**: none.
/// - **Retries**: none; the caller decides what a failure means.
/// - **Timeout**: off unless `ApiConfig::timeout_secs` is set (native only).
///
/// Ticker path segments are percent-encoded; status codes outside 2xx become
/// `CoreError::Api`, unparsable bodies become `CoreError::Deserialization`.
pub struct HttpStockProvider {
    client: Client,
    base_url: Url,
}

impl HttpStockProvider {
    pub fn new(base_url: &str) -> Result<Self, CoreError> {
        Self::from_config(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self, CoreError> {
        let base_url = Url::parse(api.base_url.trim())
            .map_err(|e| CoreError::Config(format!("Invalid base URL '{}': {e}", api.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::Config(format!(
                "Base URL '{}' cannot carry a path",
                api.base_url
            )));
        }

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match api.timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder,
        };
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("HTTP client setup failed: {e}")))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/api/stocks/{segments...}` with each segment encoded.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url, CoreError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                CoreError::Config(format!("Base URL '{}' cannot carry a path", self.base_url))
            })?;
            path.pop_if_empty().extend(["api", "stocks"]).extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, CoreError> {
        log::debug!("GET {endpoint} ({})", url.path());
        let resp = self.client.get(url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                endpoint: endpoint.to_string(),
                message: format!("HTTP {status}"),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| CoreError::Deserialization(format!("{endpoint}: {e}")))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl StockDataProvider for HttpStockProvider {
    fn name(&self) -> &str {
        "HTTP backend"
    }

    async fn search(&self, query: &str) -> Result<Vec<TickerSearchResult>, CoreError> {
        let url = self.endpoint_url(&["search"])?;
        self.get_json("search", url, &[("query", query.to_string())])
            .await
    }

    async fn get_metrics(&self, ticker: &str) -> Result<StockMetrics, CoreError> {
        let url = self.endpoint_url(&[ticker, "metrics"])?;
        self.get_json("metrics", url, &[]).await
    }

    async fn get_historical(&self, ticker: &str) -> Result<Vec<HistoricalPoint>, CoreError> {
        let url = self.endpoint_url(&[ticker, "historical"])?;
        self.get_json("historical", url, &[]).await
    }

    async fn get_prediction(
        &self,
        ticker: &str,
        days: u32,
    ) -> Result<PredictionResponse, CoreError> {
        let url = self.endpoint_url(&[ticker, "prediction"])?;
        self.get_json("prediction", url, &[("days", days.to_string())])
            .await
    }
}
