/// Blocking, user-facing notices.
///
/// The host decides how to show them; the text never reveals the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAlert {
    /// Metrics or historical fetch failed during a selection.
    LoadFailed,
    /// The prediction request failed.
    PredictionFailed,
    /// A prediction was requested before any stock data was loaded.
    SelectStockFirst,
}

impl std::fmt::Display for UserAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserAlert::LoadFailed => write!(f, "Failed to load stock data. Please try again."),
            UserAlert::PredictionFailed => {
                write!(f, "Failed to generate prediction. Please try again.")
            }
            UserAlert::SelectStockFirst => write!(f, "Please select a stock first"),
        }
    }
}
