pub mod chart_service;
pub mod metrics_service;
pub mod prediction_service;
pub mod range_filter;
pub mod search_service;
