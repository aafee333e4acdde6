use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::asset::AssetType;

/// Trait abstraction for all quote providers.
///
/// Each external API (Finnhub, CoinGecko, FMP) implements this trait, so
/// swapping an endpoint only touches its own implementation.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Which asset types this provider can handle.
    fn supported_asset_types(&self) -> Vec<AssetType>;

    /// Get the current unit price of `symbol` in USD.
    ///
    /// Makes exactly one request. Any failure (transport, timeout, HTTP
    /// status, malformed body, missing price) is an `Err`.
    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError>;
}
