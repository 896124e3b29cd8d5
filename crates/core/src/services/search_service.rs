use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::SearchConfig;
use crate::models::search::SearchResults;
use crate::providers::traits::StockDataProvider;

/// Search-as-you-type over the ticker search endpoint.
///
/// `on_input` debounces: each keystroke cancels the pending lookup (timer
/// or request) and schedules a new one after the quiet period, so only the
/// last value of a burst reaches the backend. `search_now` skips the timer.
///
/// Results are published on a watch channel. Must be used inside a Tokio
/// runtime, since debounced lookups run as spawned tasks (inside a
/// `LocalSet` on wasm32).
pub struct SearchController {
    provider: Arc<dyn StockDataProvider>,
    quiet_period: Duration,
    min_query_len: usize,
    pending: Mutex<Option<JoinHandle<()>>>,
    results: Arc<watch::Sender<SearchResults>>,
}

impl SearchController {
    pub fn new(provider: Arc<dyn StockDataProvider>, config: &SearchConfig) -> Self {
        let (tx, _rx) = watch::channel(SearchResults::Hidden);
        Self {
            provider,
            quiet_period: config.debounce(),
            min_query_len: config.min_query_len,
            pending: Mutex::new(None),
            results: Arc::new(tx),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Subscribe to result list updates.
    pub fn subscribe(&self) -> watch::Receiver<SearchResults> {
        self.results.subscribe()
    }

    /// Latest published result list.
    pub fn results(&self) -> SearchResults {
        self.results.borrow().clone()
    }

    /// Handle a keystroke: replace any pending lookup with a debounced one.
    pub fn on_input(&self, text: &str) {
        let provider = Arc::clone(&self.provider);
        let results = Arc::clone(&self.results);
        let quiet_period = self.quiet_period;
        let min_len = self.min_query_len;
        let query = text.to_string();

        let lookup = async move {
            tokio::time::sleep(quiet_period).await;
            let outcome = run_search(provider.as_ref(), &query, min_len).await;
            results.send_replace(outcome);
        };
        #[cfg(not(target_arch = "wasm32"))]
        let handle = tokio::spawn(lookup);
        // Provider futures are not `Send` in the browser.
        #[cfg(target_arch = "wasm32")]
        let handle = tokio::task::spawn_local(lookup);

        if let Some(previous) = self.replace_pending(Some(handle)) {
            previous.abort();
        }
    }

    /// Run a lookup right away, cancelling anything pending.
    pub async fn search_now(&self, text: &str) -> SearchResults {
        self.cancel_pending();
        let outcome = run_search(self.provider.as_ref(), text, self.min_query_len).await;
        self.results.send_replace(outcome.clone());
        outcome
    }

    /// Hide the list (after a row is chosen) and drop any pending lookup.
    pub fn hide(&self) {
        self.cancel_pending();
        self.results.send_replace(SearchResults::Hidden);
    }

    /// Abort the pending debounced lookup, if any.
    pub fn cancel_pending(&self) {
        if let Some(previous) = self.replace_pending(None) {
            previous.abort();
        }
    }

    fn replace_pending(&self, next: Option<JoinHandle<()>>) -> Option<JoinHandle<()>> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *pending, next)
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// One lookup, without debounce.
///
/// Input shorter than `min_len` characters clears the list and sends nothing.
/// Failures are logged and shown as the error placeholder; no retry.
pub async fn run_search(
    provider: &dyn StockDataProvider,
    query: &str,
    min_len: usize,
) -> SearchResults {
    if query.chars().count() < min_len.max(1) {
        return SearchResults::Hidden;
    }

    match provider.search(query).await {
        Ok(matches) => {
            log::debug!("Search '{query}' returned {} match(es)", matches.len());
            SearchResults::from_matches(matches)
        }
        Err(e) => {
            log::error!("Error searching stocks: {e}");
            SearchResults::Error
        }
    }
}
