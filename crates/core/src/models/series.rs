use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// A single closing price on a calendar date.
///
/// The backend also sends open/high/low/volume; they are kept when present
/// but the chart only plots `close`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub date: NaiveDate,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl HistoricalPoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close,
            open: None,
            high: None,
            low: None,
            volume: None,
        }
    }
}

/// One forecast day with its confidence bounds.
///
/// The backend guarantees `lower <= predicted <= upper`. Nothing in this
/// crate re-checks or clamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub date: NaiveDate,
    pub predicted: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Body of `GET /api/stocks/{ticker}/prediction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub predictions: Vec<PredictionPoint>,
    #[serde(default)]
    pub used_external_data: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Millis(i64),
}

/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp, or Unix milliseconds.
fn deserialize_flexible_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    match RawDate::deserialize(deserializer)? {
        RawDate::Text(s) => parse_date(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognised date '{s}'"))
        }),
        RawDate::Millis(ms) => DateTime::from_timestamp_millis(ms)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {ms}"))),
    }
}

/// Parse a calendar date out of the textual forms the backend may send.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .ok()
}
