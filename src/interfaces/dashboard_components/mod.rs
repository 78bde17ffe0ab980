pub mod metrics_card;
pub mod operations_view;
pub mod profitability_view;
pub mod summary_view;
