pub mod chart_service;
pub mod metrics_service;
pub mod portfolio_service;
pub mod price_feed;
pub mod price_service;
pub mod rate_limiter;
