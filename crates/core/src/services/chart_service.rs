use crate::models::asset::{Asset, AssetType};
use crate::models::chart::{AllocationSlice, InvestedVsCurrent};
use crate::models::price::PriceMap;
use crate::services::metrics_service::percent_of;

/// Generates chart-ready data sets from assets and prices.
///
/// The core computes all the numbers; the frontend only renders.
/// Chart data includes:
/// - Current value per asset class (allocation pie)
/// - Invested vs. current value per asset (bar chart)
///
/// Assets without a resolved price are valued at their purchase price, so
/// charts stay meaningful before the first fetch cycle completes.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Current value per asset class with its share of the total.
    ///
    /// Classes with no value are omitted. Order is stock, bond, crypto.
    pub fn allocation_by_class(&self, assets: &[Asset], prices: &PriceMap) -> Vec<AllocationSlice> {
        let values: Vec<(AssetType, f64)> = AssetType::ALL
            .iter()
            .map(|&asset_type| {
                let value = assets
                    .iter()
                    .filter(|a| a.asset_type == asset_type)
                    .map(|a| Self::chart_price(a, prices) * a.quantity)
                    .sum();
                (asset_type, value)
            })
            .collect();

        let total: f64 = values.iter().map(|(_, v)| v.max(0.0)).sum();

        values
            .into_iter()
            .filter(|(_, value)| *value > 0.0)
            .map(|(asset_type, value)| AllocationSlice {
                asset_type,
                value,
                allocation_pct: percent_of(value, total),
            })
            .collect()
    }

    /// One `{name, invested, current}` row per asset, in input order.
    pub fn invested_vs_current(&self, assets: &[Asset], prices: &PriceMap) -> Vec<InvestedVsCurrent> {
        assets
            .iter()
            .map(|a| InvestedVsCurrent {
                name: a.name.clone(),
                invested: a.amount_invested,
                current: Self::chart_price(a, prices) * a.quantity,
            })
            .collect()
    }

    fn chart_price(asset: &Asset, prices: &PriceMap) -> f64 {
        prices.get(&asset.id).unwrap_or(asset.purchase_price)
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
