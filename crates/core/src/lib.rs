pub mod errors;
pub mod fallback;
pub mod models;
pub mod providers;
pub mod services;
pub mod store;

use std::sync::Arc;
use uuid::Uuid;

use errors::CoreError;
use models::{
    asset::{Asset, NewAsset},
    chart::{AllocationSlice, InvestedVsCurrent},
    filter::{AssetFilter, TypeCounts},
    metrics::{OverallSummary, PortfolioBreakdown, TimeValueResult},
    price::PriceMap,
    settings::Settings,
};
use services::{
    chart_service::ChartService, metrics_service::MetricsService,
    portfolio_service::PortfolioService, price_feed::PriceFeed, price_service::PriceService,
};
use store::{AssetStore, MemoryAssetStore, Subscription};

/// Main entry point for the Portfolio Tracker core library.
///
/// Owns the asset store handle, the price service and the most recent
/// price map. Metrics are recomputed from scratch on every call.
#[must_use]
pub struct PortfolioTracker {
    store: Arc<dyn AssetStore>,
    price_service: Arc<PriceService>,
    portfolio_service: PortfolioService,
    metrics_service: MetricsService,
    chart_service: ChartService,
    prices: PriceMap,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("prices", &self.prices.len())
            .field("inflation_rate", &self.metrics_service.inflation_rate())
            .field("rate_limit_remaining", &self.price_service.rate_limiter().remaining())
            .finish()
    }
}

impl PortfolioTracker {
    /// Tracker over `store`, with default providers configured from `settings`.
    pub fn new(settings: &Settings, store: Arc<dyn AssetStore>) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::with_services(
            store,
            PriceService::from_settings(settings),
            MetricsService::with_inflation_rate(settings.inflation_rate),
        ))
    }

    /// Tracker over a fresh in-memory store.
    pub fn in_memory(settings: &Settings) -> Result<Self, CoreError> {
        Self::new(settings, Arc::new(MemoryAssetStore::new()))
    }

    /// Tracker from explicit parts (custom providers, shared rate limiter, ...).
    pub fn with_services(
        store: Arc<dyn AssetStore>,
        price_service: PriceService,
        metrics_service: MetricsService,
    ) -> Self {
        Self {
            store,
            price_service: Arc::new(price_service),
            portfolio_service: PortfolioService::new(),
            metrics_service,
            chart_service: ChartService::new(),
            prices: PriceMap::new(),
        }
    }

    // ── Assets ──────────────────────────────────────────────────────

    /// Validate form input and store the new asset. Returns its id.
    /// Invalid input never reaches the store.
    pub async fn add_asset(&self, input: NewAsset) -> Result<Uuid, CoreError> {
        let asset = self.portfolio_service.build_asset(input)?;
        self.store.create(asset).await
    }

    /// Delete an asset by id.
    pub async fn remove_asset(&self, id: Uuid) -> Result<(), CoreError> {
        self.store.delete(id).await
    }

    /// All assets, in store order.
    pub async fn assets(&self) -> Result<Vec<Asset>, CoreError> {
        self.store.fetch_once().await
    }

    /// Assets of the classes selected by `filter`.
    pub async fn filtered_assets(&self, filter: AssetFilter) -> Result<Vec<Asset>, CoreError> {
        let assets = self.assets().await?;
        Ok(self
            .portfolio_service
            .filter_assets(&assets, filter)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn type_counts(&self) -> Result<TypeCounts, CoreError> {
        let assets = self.assets().await?;
        Ok(self.portfolio_service.type_counts(&assets))
    }

    /// Snapshots of the asset set, current one first.
    pub fn subscribe(&self) -> Subscription {
        self.store.subscribe()
    }

    // ── Prices ──────────────────────────────────────────────────────

    /// Resolve a price for every stored asset and replace the price map.
    pub async fn refresh_prices(&mut self) -> Result<&PriceMap, CoreError> {
        let assets = self.assets().await?;
        self.prices = self.price_service.resolve_prices(&assets).await;
        Ok(&self.prices)
    }

    /// The price map from the last refresh.
    #[must_use]
    pub fn prices(&self) -> &PriceMap {
        &self.prices
    }

    /// Replace the price map, e.g. with one maintained by a [`PriceFeed`].
    pub fn set_prices(&mut self, prices: PriceMap) {
        self.prices = prices;
    }

    /// A price feed sharing this tracker's price service and rate limiter.
    pub fn price_feed(&self) -> PriceFeed {
        PriceFeed::new(Arc::clone(&self.price_service))
    }

    #[must_use]
    pub fn price_service(&self) -> &PriceService {
        &self.price_service
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Stocks / bonds / crypto aggregates and the overall total.
    pub async fn portfolio_breakdown(&self) -> Result<PortfolioBreakdown, CoreError> {
        let assets = self.assets().await?;
        Ok(self
            .metrics_service
            .compute_portfolio_breakdown(&assets, &self.prices))
    }

    /// Invested / current / gain-loss totals for the filtered view.
    pub async fn overall_metrics(&self, filter: AssetFilter) -> Result<OverallSummary, CoreError> {
        let assets = self.filtered_assets(filter).await?;
        Ok(self
            .metrics_service
            .compute_overall_metrics(&assets, &self.prices))
    }

    /// Inflation-adjusted gain/loss of the filtered view for `target_year`
    /// (current year when `None`).
    pub async fn time_value(
        &self,
        filter: AssetFilter,
        target_year: Option<i32>,
    ) -> Result<TimeValueResult, CoreError> {
        let assets = self.filtered_assets(filter).await?;
        Ok(self
            .metrics_service
            .compute_time_value(&assets, &self.prices, target_year))
    }

    #[must_use]
    pub fn metrics(&self) -> &MetricsService {
        &self.metrics_service
    }

    // ── Charts ──────────────────────────────────────────────────────

    pub async fn allocation(&self) -> Result<Vec<AllocationSlice>, CoreError> {
        let assets = self.assets().await?;
        Ok(self.chart_service.allocation_by_class(&assets, &self.prices))
    }

    pub async fn invested_vs_current(
        &self,
        filter: AssetFilter,
    ) -> Result<Vec<InvestedVsCurrent>, CoreError> {
        let assets = self.filtered_assets(filter).await?;
        Ok(self.chart_service.invested_vs_current(&assets, &self.prices))
    }
}
