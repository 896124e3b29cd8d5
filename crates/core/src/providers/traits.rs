use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::metrics::StockMetrics;
use crate::models::search::TickerSearchResult;
use crate::models::series::{HistoricalPoint, PredictionResponse};

/// The backend the dashboard talks to.
///
/// `HttpStockProvider` is the production implementation; tests plug in
/// in-memory mocks. Every method is a single GET with no retry.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait StockDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// `GET /api/stocks/search?query=...`
    async fn search(&self, query: &str) -> Result<Vec<TickerSearchResult>, CoreError>;

    /// `GET /api/stocks/{ticker}/metrics`
    async fn get_metrics(&self, ticker: &str) -> Result<StockMetrics, CoreError>;

    /// `GET /api/stocks/{ticker}/historical`, chronological.
    async fn get_historical(&self, ticker: &str) -> Result<Vec<HistoricalPoint>, CoreError>;

    /// `GET /api/stocks/{ticker}/prediction?days=...`
    async fn get_prediction(
        &self,
        ticker: &str,
        days: u32,
    ) -> Result<PredictionResponse, CoreError>;
}
