use super::chart::ChartConfig;
use super::metrics::MetricsPanel;

/// Everything the host page renders outside the search list.
///
/// Rebuilt piecemeal by the dashboard; the host reads it after each call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    /// Text shown in the search box (echoes the chosen ticker).
    pub search_input: String,
    /// Metrics and chart section; shown once a ticker is chosen.
    pub content_visible: bool,
    pub metrics: MetricsPanel,
    /// "Used external data" badge next to the prediction.
    pub external_data_badge_visible: bool,
    /// Current chart; replaced wholesale on every update.
    pub chart: Option<ChartConfig>,
    /// Bumped on every rebuild so the host knows to recreate its chart.
    pub chart_revision: u64,
}
