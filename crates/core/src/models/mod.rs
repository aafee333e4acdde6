pub mod asset;
pub mod chart;
pub mod filter;
pub mod metrics;
pub mod price;
pub mod settings;
