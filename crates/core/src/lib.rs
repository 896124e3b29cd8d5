pub mod config;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::sync::Arc;

use chrono::NaiveDate;
use config::DashboardConfig;
use models::{
    alert::UserAlert,
    metrics::{MetricsPanel, StockMetrics},
    range::TimeRange,
    search::SearchResults,
    series::HistoricalPoint,
    session::{LoadToken, Session},
    view::DashboardView,
};
use providers::{http::HttpStockProvider, traits::StockDataProvider};
use services::{
    chart_service::ChartService,
    metrics_service::MetricsService,
    prediction_service::{PredictionControl, PredictionService},
    range_filter::filter_by_range,
    search_service::SearchController,
};
use tokio::sync::watch;

use errors::CoreError;

/// Main entry point for the stock dashboard core library.
/// Holds the live session, the host-facing view state and all services.
///
/// Every method runs on the host's single UI task; the host re-reads
/// [`StockDashboard::view`] and [`StockDashboard::take_alert`] after each call.
#[must_use]
pub struct StockDashboard {
    provider: Arc<dyn StockDataProvider>,
    search: SearchController,
    metrics_service: MetricsService,
    chart_service: ChartService,
    prediction_service: PredictionService,
    prediction_control: PredictionControl,
    session: Session,
    view: DashboardView,
    range: TimeRange,
    horizon_days: u32,
    /// Most recent blocking notice not yet taken by the host.
    alert: Option<UserAlert>,
}

impl std::fmt::Debug for StockDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockDashboard")
            .field("provider", &self.provider.name())
            .field("ticker", &self.session.selected_ticker)
            .field("historical", &self.session.historical.len())
            .field("predictions", &self.session.predictions.len())
            .field("range", &self.range)
            .field("horizon_days", &self.horizon_days)
            .field("chart_revision", &self.view.chart_revision)
            .finish()
    }
}

impl StockDashboard {
    /// Create a dashboard talking HTTP to `config.api.base_url`.
    pub fn new(config: DashboardConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let provider = HttpStockProvider::from_config(&config.api)?;
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Create a dashboard over any backend implementation.
    pub fn with_provider(config: DashboardConfig, provider: Arc<dyn StockDataProvider>) -> Self {
        let search = SearchController::new(Arc::clone(&provider), &config.search);
        let horizon_days = config.prediction.clamp_days(config.prediction.default_days);
        Self {
            search,
            metrics_service: MetricsService::new(),
            chart_service: ChartService::new(),
            prediction_service: PredictionService::new(config.prediction.clone()),
            prediction_control: PredictionControl::new(),
            session: Session::new(),
            view: DashboardView::default(),
            range: config.chart.default_range,
            horizon_days,
            alert: None,
            provider,
        }
    }

    // ── Read access ─────────────────────────────────────────────────

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Shared handle on the prediction trigger's enabled/label state.
    pub fn prediction_control(&self) -> PredictionControl {
        self.prediction_control.clone()
    }

    /// Take the pending user alert, if any.
    pub fn take_alert(&mut self) -> Option<UserAlert> {
        self.alert.take()
    }

    // ── Search ──────────────────────────────────────────────────────

    /// Keystroke in the search box (debounced).
    pub fn on_search_input(&mut self, text: &str) {
        self.view.search_input = text.to_string();
        self.search.on_input(text);
    }

    /// Search button: look up the current input immediately.
    pub async fn search_now(&mut self) -> SearchResults {
        let query = self.view.search_input.clone();
        self.search.search_now(&query).await
    }

    pub fn search_results(&self) -> SearchResults {
        self.search.results()
    }

    pub fn subscribe_search(&self) -> watch::Receiver<SearchResults> {
        self.search.subscribe()
    }

    // ── Stock selection ─────────────────────────────────────────────

    /// Select a ticker and load it: metrics first, then history.
    ///
    /// Any failure aborts the load, is logged, and raises
    /// `UserAlert::LoadFailed`. Whatever rendered before the failure stays.
    pub async fn select_ticker(&mut self, ticker: &str) -> Result<(), CoreError> {
        let token = self.begin_load(ticker);
        match self.load(&token).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.report_load_error(&e);
                Err(e)
            }
        }
    }

    /// Record a new selection and show the loading state.
    ///
    /// Returns the token the later `apply_*` calls must present. Hosts that
    /// drive fetches themselves use this with `apply_metrics` and
    /// `apply_historical`; `select_ticker` does all three.
    pub fn begin_load(&mut self, ticker: &str) -> LoadToken {
        self.search.hide();
        let (next, token) = self.session.select(ticker);
        self.session = next;
        self.view.search_input = token.ticker().to_string();
        self.view.content_visible = true;
        self.view.metrics = MetricsPanel::Loading;
        log::info!("Selected {} (generation {})", token.ticker(), token.generation());
        token
    }

    /// Render fetched metrics, unless a newer selection has superseded `token`.
    pub fn apply_metrics(
        &mut self,
        token: &LoadToken,
        metrics: &StockMetrics,
    ) -> Result<(), CoreError> {
        if !self.session.is_current(token) {
            return Err(CoreError::StaleResponse {
                ticker: token.ticker().to_string(),
            });
        }
        self.view.metrics = MetricsPanel::Ready(self.metrics_service.render(metrics));
        Ok(())
    }

    /// Install fetched history, clear any prediction and rebuild the chart.
    pub fn apply_historical(
        &mut self,
        token: &LoadToken,
        historical: Vec<HistoricalPoint>,
    ) -> Result<(), CoreError> {
        self.session = self.session.complete_load(token, historical)?;
        self.view.external_data_badge_visible = false;
        self.rebuild_chart();
        Ok(())
    }

    async fn load(&mut self, token: &LoadToken) -> Result<(), CoreError> {
        let metrics = self.provider.get_metrics(token.ticker()).await?;
        self.apply_metrics(token, &metrics)?;

        let historical = self.provider.get_historical(token.ticker()).await?;
        log::debug!("Loaded {} historical point(s) for {}", historical.len(), token.ticker());
        self.apply_historical(token, historical)
    }

    fn report_load_error(&mut self, e: &CoreError) {
        if let CoreError::StaleResponse { ticker } = e {
            log::warn!("Ignoring stale stock data for {ticker}");
            return;
        }
        log::error!("Error fetching stock data: {e}");
        self.alert = Some(UserAlert::LoadFailed);
    }

    // ── View options ────────────────────────────────────────────────

    /// Change the lookback window and redraw.
    pub fn set_range(&mut self, range: TimeRange) {
        self.range = range;
        self.rebuild_chart();
    }

    /// Same as `set_range`, from a selector token; unknown tokens mean 3M.
    pub fn set_range_token(&mut self, token: &str) {
        self.set_range(TimeRange::from_token(token));
    }

    /// Move the horizon slider; the value is clamped to its bounds.
    pub fn set_horizon(&mut self, days: u32) -> u32 {
        self.horizon_days = self.prediction_service.config().clamp_days(days);
        self.horizon_days
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Slider caption, e.g. "30 days".
    pub fn horizon_label(&self) -> String {
        PredictionService::days_label(self.horizon_days)
    }

    // ── Prediction ──────────────────────────────────────────────────

    /// Request a prediction for the selected ticker at the current horizon.
    ///
    /// Without a loaded stock this raises `UserAlert::SelectStockFirst` and
    /// sends nothing. A network or parse failure raises
    /// `UserAlert::PredictionFailed`. The trigger is re-enabled either way.
    pub async fn generate_prediction(&mut self) -> Result<(), CoreError> {
        let outcome = self
            .prediction_service
            .request(
                self.provider.as_ref(),
                &self.session,
                &self.prediction_control,
                self.horizon_days,
            )
            .await
            .and_then(|(token, response)| self.session.apply_prediction(&token, response));

        match outcome {
            Ok(next) => {
                self.session = next;
                self.view.external_data_badge_visible = self.session.used_external_data;
                self.rebuild_chart();
                Ok(())
            }
            Err(e) => {
                match &e {
                    CoreError::NoStockSelected => {
                        self.alert = Some(UserAlert::SelectStockFirst);
                    }
                    CoreError::PredictionInFlight => {
                        log::debug!("Prediction already in progress");
                    }
                    CoreError::StaleResponse { ticker } => {
                        log::warn!("Ignoring stale prediction for {ticker}");
                    }
                    _ => {
                        log::error!("Error generating prediction: {e}");
                        self.alert = Some(UserAlert::PredictionFailed);
                    }
                }
                Err(e)
            }
        }
    }

    // ── Chart ───────────────────────────────────────────────────────

    /// Tooltip lines at `position` on the combined historical + prediction
    /// timeline of the current chart.
    pub fn tooltip_at(&self, position: usize) -> Vec<String> {
        self.view
            .chart
            .as_ref()
            .map(|chart| self.chart_service.tooltip_at(chart, position))
            .unwrap_or_default()
    }

    /// Discard the current chart and build a new one from the session.
    fn rebuild_chart(&mut self) {
        let filtered = filter_by_range(&self.session.historical, self.range, today());
        let chart = self
            .chart_service
            .compose(&filtered, &self.session.predictions);
        self.view.chart = Some(chart);
        self.view.chart_revision = self.view.chart_revision.wrapping_add(1);
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
