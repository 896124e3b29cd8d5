use crate::models::metrics::{MetricItem, MetricsView, StockMetrics, Trend};

const MILLION: f64 = 1_000_000.0;

/// Turns a metrics snapshot into display strings.
///
/// Pure: no network, no session access.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Build the headline and the metrics grid.
    ///
    /// A change of exactly zero (either sign) counts as positive.
    pub fn render(&self, metrics: &StockMetrics) -> MetricsView {
        let trend = if metrics.change >= 0.0 { Trend::Up } else { Trend::Down };
        let sign = match trend {
            Trend::Up => "+",
            Trend::Down => "",
        };

        let items = vec![
            item("Volume", format_large_number(metrics.volume)),
            item("Avg Volume", format_large_number(metrics.avg_volume)),
            item("Market Cap", metrics.market_cap.clone()),
            item("P/E Ratio", to_fixed(metrics.pe_ratio, 2)),
            item("Dividend", format_currency(metrics.dividend)),
            item("52W High", format_currency(metrics.week52_high)),
            item("52W Low", format_currency(metrics.week52_low)),
        ];

        MetricsView {
            ticker: metrics.ticker.clone(),
            price: format_currency(metrics.current_price),
            change: format!(
                "{sign}{} ({sign}{}%)",
                to_fixed(metrics.change, 2),
                to_fixed(metrics.change_percent, 2)
            ),
            trend,
            items,
        }
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

fn item(title: &str, value: String) -> MetricItem {
    MetricItem {
        title: title.to_string(),
        value,
    }
}

/// `$` plus two decimals.
pub fn format_currency(value: f64) -> String {
    format!("${}", to_fixed(value, 2))
}

/// Fixed-point rendering; exact ties round away from zero.
///
/// `2.125` → `"2.13"` where `{:.2}` alone gives `"2.12"`. Negative zero
/// prints without a sign.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    // A tie at N digits is exactly an odd multiple of 2^-(N+1).
    let halves = magnitude * 2f64.powi(digits as i32 + 1);
    let rounded = if halves.fract() == 0.0 && halves % 2.0 == 1.0 {
        let scale = 10f64.powi(digits as i32);
        (magnitude * scale).round() / scale
    } else {
        magnitude
    };

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{rounded:.digits$}")
}

/// Abbreviate to millions at or above 1,000,000; otherwise group thousands.
///
/// `999999` → `"999,999"`, `1000000` → `"1.00M"`, `2500000` → `"2.50M"`.
pub fn format_large_number(num: f64) -> String {
    if num >= MILLION {
        format!("{}M", to_fixed(num / MILLION, 2))
    } else {
        format_grouped(num)
    }
}

/// en-US grouping with up to three fraction digits, trailing zeros dropped.
pub fn format_grouped(num: f64) -> String {
    if !num.is_finite() {
        return num.to_string();
    }

    let rendered = to_fixed(num.abs(), 3);
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = num < 0.0 && (grouped != "0" || !frac.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}
