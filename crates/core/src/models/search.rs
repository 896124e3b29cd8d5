use serde::{Deserialize, Serialize};

/// One row returned by `GET /api/stocks/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerSearchResult {
    pub ticker: String,
    pub name: String,
}

/// What the search result list currently shows.
///
/// The host renders this as-is; the placeholder variants carry fixed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchResults {
    /// List is cleared and not shown.
    #[default]
    Hidden,
    /// Selectable rows, in backend order.
    Matches(Vec<TickerSearchResult>),
    /// The query succeeded but matched nothing.
    NoResults,
    /// The lookup failed (network, status, or malformed body).
    Error,
}

impl SearchResults {
    pub const NO_RESULTS_TEXT: &'static str = "No results found";
    pub const ERROR_TEXT: &'static str = "Error fetching results";

    pub fn from_matches(matches: Vec<TickerSearchResult>) -> Self {
        if matches.is_empty() {
            SearchResults::NoResults
        } else {
            SearchResults::Matches(matches)
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, SearchResults::Hidden)
    }

    /// Placeholder text for the non-row states.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            SearchResults::NoResults => Some(Self::NO_RESULTS_TEXT),
            SearchResults::Error => Some(Self::ERROR_TEXT),
            SearchResults::Hidden | SearchResults::Matches(_) => None,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[TickerSearchResult] {
        match self {
            SearchResults::Matches(rows) => rows,
            _ => &[],
        }
    }
}
