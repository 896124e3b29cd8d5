use crate::errors::CoreError;

use super::series::{HistoricalPoint, PredictionPoint, PredictionResponse};

/// The single live stock session.
///
/// Never mutated in place by the dashboard: every transition takes the
/// current session and returns the next one, so each step can be tested
/// without any network or UI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub selected_ticker: Option<String>,
    pub historical: Vec<HistoricalPoint>,
    pub predictions: Vec<PredictionPoint>,
    pub used_external_data: bool,
    /// Bumped on every selection; responses carrying an older value are stale.
    generation: u64,
}

/// Identifies which selection an in-flight response belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadToken {
    ticker: String,
    generation: u64,
}

impl LoadToken {
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once a ticker is selected and its history has arrived.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.selected_ticker.as_deref().is_some_and(|t| !t.is_empty())
            && !self.historical.is_empty()
    }

    #[must_use]
    pub fn is_current(&self, token: &LoadToken) -> bool {
        token.generation == self.generation
            && self.selected_ticker.as_deref() == Some(token.ticker.as_str())
    }

    /// Start a new selection. The ticker is kept exactly as given.
    ///
    /// Previously loaded series stay in place until `complete_load` succeeds;
    /// a failed load does not roll anything back.
    pub fn select(&self, ticker: &str) -> (Session, LoadToken) {
        let generation = self.generation.wrapping_add(1);
        let ticker = ticker.to_string();
        let next = Session {
            selected_ticker: Some(ticker.clone()),
            generation,
            ..self.clone()
        };
        (next, LoadToken { ticker, generation })
    }

    /// Install a freshly fetched history and drop any prior prediction.
    pub fn complete_load(
        &self,
        token: &LoadToken,
        historical: Vec<HistoricalPoint>,
    ) -> Result<Session, CoreError> {
        self.ensure_current(token)?;
        Ok(Session {
            historical,
            predictions: Vec::new(),
            used_external_data: false,
            ..self.clone()
        })
    }

    /// Token for a prediction against the current selection.
    ///
    /// Fails with `NoStockSelected` when there is no ticker or no history yet.
    pub fn prediction_token(&self) -> Result<LoadToken, CoreError> {
        if !self.is_ready() {
            return Err(CoreError::NoStockSelected);
        }
        let ticker = self.selected_ticker.clone().unwrap_or_default();
        Ok(LoadToken {
            ticker,
            generation: self.generation,
        })
    }

    /// Store a prediction result, overwriting the previous one.
    pub fn apply_prediction(
        &self,
        token: &LoadToken,
        response: PredictionResponse,
    ) -> Result<Session, CoreError> {
        self.ensure_current(token)?;
        Ok(Session {
            predictions: response.predictions,
            used_external_data: response.used_external_data,
            ..self.clone()
        })
    }

    fn ensure_current(&self, token: &LoadToken) -> Result<(), CoreError> {
        if self.is_current(token) {
            Ok(())
        } else {
            Err(CoreError::StaleResponse {
                ticker: token.ticker.clone(),
            })
        }
    }
}
