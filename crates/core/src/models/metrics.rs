use serde::{Deserialize, Serialize};

/// Snapshot returned by `GET /api/stocks/{ticker}/metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMetrics {
    pub ticker: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: f64,
    pub avg_volume: f64,
    /// Already formatted by the backend (e.g. "$512.34B").
    pub market_cap: String,
    pub pe_ratio: f64,
    pub dividend: f64,
    #[serde(rename = "week52High")]
    pub week52_high: f64,
    #[serde(rename = "week52Low")]
    pub week52_low: f64,
}

/// Direction marker shown next to the price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Up => write!(f, "positive"),
            Trend::Down => write!(f, "negative"),
        }
    }
}

/// A titled value in the metrics grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricItem {
    pub title: String,
    pub value: String,
}

/// Display-ready rendering of [`StockMetrics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsView {
    pub ticker: String,
    /// e.g. "$185.20"
    pub price: String,
    /// e.g. "+1.25 (+0.68%)"
    pub change: String,
    pub trend: Trend,
    pub items: Vec<MetricItem>,
}

/// State of the metrics panel between selection and render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MetricsPanel {
    #[default]
    Empty,
    Loading,
    Ready(MetricsView),
}

impl MetricsPanel {
    pub const LOADING_TEXT: &'static str = "Loading metrics...";
}
