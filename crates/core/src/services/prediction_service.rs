use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::PredictionConfig;
use crate::errors::CoreError;
use crate::models::series::PredictionResponse;
use crate::models::session::{LoadToken, Session};
use crate::providers::traits::StockDataProvider;

/// State of the "Generate Prediction" trigger.
///
/// Disabled for exactly as long as a request is in flight, which makes
/// prediction requests single-flight. Clones share the same state, so a
/// host can keep one to render the button while a request runs.
#[derive(Debug, Clone, Default)]
pub struct PredictionControl {
    busy: Arc<AtomicBool>,
}

impl PredictionControl {
    pub const IDLE_LABEL: &'static str = "Generate Prediction";
    pub const BUSY_LABEL: &'static str = "Generating Prediction...";

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.busy.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.is_enabled() {
            Self::IDLE_LABEL
        } else {
            Self::BUSY_LABEL
        }
    }

    /// Disable the control; hand back a guard that re-enables it on drop.
    fn engage(&self) -> Result<InFlight, CoreError> {
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(CoreError::PredictionInFlight);
        }
        Ok(InFlight {
            busy: Arc::clone(&self.busy),
        })
    }
}

/// Re-enables the control however the request ends, including cancellation.
struct InFlight {
    busy: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Issues prediction requests against the current session.
pub struct PredictionService {
    config: PredictionConfig,
}

impl PredictionService {
    pub fn new(config: PredictionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Slider caption, e.g. "30 days".
    pub fn days_label(days: u32) -> String {
        format!("{days} days")
    }

    /// Fetch a prediction for the session's ticker over `days`.
    ///
    /// Precondition failures (`NoStockSelected`, `PredictionInFlight`) are
    /// raised before any network call. The returned token must be checked
    /// against the session when the result is applied.
    pub async fn request(
        &self,
        provider: &dyn StockDataProvider,
        session: &Session,
        control: &PredictionControl,
        days: u32,
    ) -> Result<(LoadToken, PredictionResponse), CoreError> {
        let token = session.prediction_token()?;
        let days = self.config.clamp_days(days);

        let _in_flight = control.engage()?;
        log::info!("Requesting {days}-day prediction for {}", token.ticker());
        let response = provider.get_prediction(token.ticker(), days).await?;
        log::debug!(
            "Prediction for {}: {} point(s), external data: {}",
            token.ticker(),
            response.predictions.len(),
            response.used_external_data
        );
        Ok((token, response))
    }
}
