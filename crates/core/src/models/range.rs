use serde::{Deserialize, Serialize};

/// Lookback window offered by the range selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[default]
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
}

impl TimeRange {
    pub const ALL: [TimeRange; 6] = [
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::SixMonths,
        TimeRange::OneYear,
        TimeRange::FiveYears,
    ];

    /// Parse a selector token. Anything unrecognised falls back to 3M.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "1W" => TimeRange::OneWeek,
            "1M" => TimeRange::OneMonth,
            "3M" => TimeRange::ThreeMonths,
            "6M" => TimeRange::SixMonths,
            "1Y" => TimeRange::OneYear,
            "5Y" => TimeRange::FiveYears,
            _ => TimeRange::ThreeMonths,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            TimeRange::OneWeek => "1W",
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::SixMonths => "6M",
            TimeRange::OneYear => "1Y",
            TimeRange::FiveYears => "5Y",
        }
    }

    /// Calendar days covered by the window.
    pub fn days(&self) -> i64 {
        match self {
            TimeRange::OneWeek => 7,
            TimeRange::OneMonth => 30,
            TimeRange::ThreeMonths => 90,
            TimeRange::SixMonths => 180,
            TimeRange::OneYear => 365,
            TimeRange::FiveYears => 1825,
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for TimeRange {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}
