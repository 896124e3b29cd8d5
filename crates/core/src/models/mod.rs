pub mod alert;
pub mod chart;
pub mod metrics;
pub mod range;
pub mod search;
pub mod series;
pub mod session;
pub mod view;
