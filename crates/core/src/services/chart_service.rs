use crate::models::chart::{
    AxisTitle, ChartConfig, ChartData, ChartDataset, ChartKind, ChartOptions, ChartPoint,
    DisplayFormats, Fill, Grid, Interaction, Legend, Plugins, Scales, SeriesRole, TimeAxis,
    TimeScale, TooltipOptions, ValueScale,
};
use crate::models::series::{HistoricalPoint, PredictionPoint};
use crate::services::metrics_service::to_fixed;

const HISTORICAL_COLOR: &str = "#0EA5E9";
const HISTORICAL_FILL: &str = "rgba(14, 165, 233, 0.1)";
const PREDICTION_COLOR: &str = "#06B6D4";
const BAND_FILL: &str = "rgba(224, 242, 254, 0.5)";
const TRANSPARENT: &str = "transparent";
const LINE_TENSION: f64 = 0.1;

/// Builds chart configurations from session data.
///
/// The core decides every series, colour and flag; the frontend only renders.
/// Each call returns a complete new configuration; nothing is patched in place.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Compose the chart for an already range-filtered history plus an
    /// optional prediction.
    ///
    /// With predictions the datasets are, in order: Historical, Prediction,
    /// upper bound, lower bound. The lower bound fills back to the upper one,
    /// which paints the confidence band. Bound values pass through untouched.
    pub fn compose(
        &self,
        historical: &[HistoricalPoint],
        predictions: &[PredictionPoint],
    ) -> ChartConfig {
        let mut datasets = vec![ChartDataset {
            label: Some("Historical".to_string()),
            role: SeriesRole::Historical,
            data: historical
                .iter()
                .map(|p| ChartPoint { x: p.date, y: p.close })
                .collect(),
            border_color: HISTORICAL_COLOR.to_string(),
            background_color: Some(HISTORICAL_FILL.to_string()),
            border_width: Some(2),
            border_dash: None,
            point_radius: 0,
            point_background_color: None,
            tension: LINE_TENSION,
            fill: None,
            in_legend: true,
            in_tooltip: true,
        }];

        if !predictions.is_empty() {
            datasets.push(ChartDataset {
                label: Some("Prediction".to_string()),
                role: SeriesRole::Prediction,
                data: series(predictions, |p| p.predicted),
                border_color: PREDICTION_COLOR.to_string(),
                background_color: Some(TRANSPARENT.to_string()),
                border_width: Some(2),
                border_dash: Some(vec![5, 5]),
                point_radius: 3,
                point_background_color: Some(PREDICTION_COLOR.to_string()),
                tension: LINE_TENSION,
                fill: None,
                in_legend: true,
                in_tooltip: true,
            });
            datasets.push(band_dataset(
                SeriesRole::UpperBound,
                series(predictions, |p| p.upper),
                None,
                Fill::Off,
            ));
            datasets.push(band_dataset(
                SeriesRole::LowerBound,
                series(predictions, |p| p.lower),
                Some(BAND_FILL.to_string()),
                Fill::Previous,
            ));
        }

        ChartConfig {
            kind: ChartKind::Line,
            data: ChartData { datasets },
            options: default_options(),
        }
    }

    /// Tooltip lines at `position` on the combined timeline.
    ///
    /// Positions below the historical length describe a historical close.
    /// Later positions describe the prediction at `position - historical_len`
    /// followed by its upper and lower bound. Out-of-range positions yield
    /// nothing.
    pub fn tooltip_at(&self, chart: &ChartConfig, position: usize) -> Vec<String> {
        let historical_len = chart
            .dataset(SeriesRole::Historical)
            .map(|(_, ds)| ds.data.len())
            .unwrap_or(0);

        if position < historical_len {
            return chart
                .dataset(SeriesRole::Historical)
                .and_then(|(_, ds)| value_line(ds, position))
                .into_iter()
                .collect();
        }

        let offset = position - historical_len;
        let Some((_, prediction)) = chart.dataset(SeriesRole::Prediction) else {
            return Vec::new();
        };
        let Some(head) = value_line(prediction, offset) else {
            return Vec::new();
        };

        let mut lines = vec![head];
        if let Some(upper) = band_value(chart, SeriesRole::UpperBound, offset) {
            lines.push(format!("Upper bound: ${}", to_fixed(upper, 2)));
        }
        if let Some(lower) = band_value(chart, SeriesRole::LowerBound, offset) {
            lines.push(format!("Lower bound: ${}", to_fixed(lower, 2)));
        }
        lines
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

fn series(points: &[PredictionPoint], value: impl Fn(&PredictionPoint) -> f64) -> Vec<ChartPoint> {
    points
        .iter()
        .map(|p| ChartPoint { x: p.date, y: value(p) })
        .collect()
}

fn band_dataset(
    role: SeriesRole,
    data: Vec<ChartPoint>,
    background_color: Option<String>,
    fill: Fill,
) -> ChartDataset {
    ChartDataset {
        label: None,
        role,
        data,
        border_color: TRANSPARENT.to_string(),
        background_color,
        border_width: None,
        border_dash: None,
        point_radius: 0,
        point_background_color: None,
        tension: LINE_TENSION,
        fill: Some(fill),
        in_legend: false,
        in_tooltip: false,
    }
}

/// `"{label}: $x.xx"`, or nothing for datasets kept out of tooltips.
fn value_line(dataset: &ChartDataset, index: usize) -> Option<String> {
    if !dataset.in_tooltip {
        return None;
    }
    let point = dataset.data.get(index)?;
    let label = dataset.label.as_deref().unwrap_or_default();
    Some(format!("{label}: ${}", to_fixed(point.y, 2)))
}

fn band_value(chart: &ChartConfig, role: SeriesRole, index: usize) -> Option<f64> {
    chart
        .dataset(role)
        .and_then(|(_, ds)| ds.data.get(index))
        .map(|p| p.y)
}

fn default_options() -> ChartOptions {
    ChartOptions {
        responsive: true,
        maintain_aspect_ratio: false,
        interaction: Interaction {
            mode: "index".to_string(),
            intersect: false,
        },
        scales: Scales {
            x: TimeScale {
                kind: "time".to_string(),
                time: TimeAxis {
                    unit: "day".to_string(),
                    tooltip_format: "MMM d, yyyy".to_string(),
                    display_formats: DisplayFormats {
                        day: "MMM d".to_string(),
                    },
                },
                grid: Grid {
                    display: Some(false),
                    color: None,
                },
            },
            y: ValueScale {
                title: AxisTitle {
                    display: true,
                    text: "Price ($)".to_string(),
                },
                grid: Grid {
                    display: None,
                    color: Some("rgba(0, 0, 0, 0.05)".to_string()),
                },
            },
        },
        plugins: Plugins {
            legend: Legend {
                display: true,
                position: "top".to_string(),
            },
            tooltip: TooltipOptions { enabled: true },
        },
    }
}
