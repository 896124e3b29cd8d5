use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Line-chart configuration in the shape the charting library consumes.
///
/// The core builds these; the host hands the serialized JSON to the renderer
/// and never edits it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub datasets: Vec<ChartDataset>,
}

/// Which part of the timeline a dataset draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesRole {
    Historical,
    Prediction,
    UpperBound,
    LowerBound,
}

impl SeriesRole {
    /// Bound series only exist to paint the confidence band.
    pub fn is_band(&self) -> bool {
        matches!(self, SeriesRole::UpperBound | SeriesRole::LowerBound)
    }
}

/// An `(x, y)` sample on the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: NaiveDate,
    pub y: f64,
}

/// Area fill mode for a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Off,
    /// Shade down to the dataset immediately before this one.
    Previous,
}

impl Serialize for Fill {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Fill::Off => serializer.serialize_bool(false),
            Fill::Previous => serializer.serialize_str("-1"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub role: SeriesRole,
    pub data: Vec<ChartPoint>,
    pub border_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
    pub point_radius: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<String>,
    pub tension: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    /// Read by the host's legend label filter.
    pub in_legend: bool,
    /// Read by the host's tooltip label callback.
    pub in_tooltip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub interaction: Interaction,
    pub scales: Scales,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub mode: String,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scales {
    pub x: TimeScale,
    pub y: ValueScale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeScale {
    #[serde(rename = "type")]
    pub kind: String,
    pub time: TimeAxis,
    pub grid: Grid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAxis {
    pub unit: String,
    pub tooltip_format: String,
    pub display_formats: DisplayFormats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFormats {
    pub day: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueScale {
    pub title: AxisTitle,
    pub grid: Grid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Grid {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub tooltip: TooltipOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub display: bool,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipOptions {
    pub enabled: bool,
}

impl ChartConfig {
    /// First dataset playing `role`, with its index.
    pub fn dataset(&self, role: SeriesRole) -> Option<(usize, &ChartDataset)> {
        self.data
            .datasets
            .iter()
            .enumerate()
            .find(|(_, ds)| ds.role == role)
    }

    /// Labels that belong in the interactive legend, in dataset order.
    pub fn legend_labels(&self) -> Vec<&str> {
        self.data
            .datasets
            .iter()
            .filter(|ds| ds.in_legend)
            .filter_map(|ds| ds.label.as_deref())
            .collect()
    }

    pub fn has_prediction(&self) -> bool {
        self.dataset(SeriesRole::Prediction).is_some()
    }
}
