use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::fallback::fallback_price;
use crate::models::asset::{Asset, AssetType};
use crate::models::price::PriceMap;
use crate::models::settings::Settings;
use crate::providers::registry::PriceProviderRegistry;
use crate::services::rate_limiter::RateLimiter;

/// Resolves current unit prices from the quote providers.
///
/// Two layers:
/// - [`PriceService::fetch_price`] makes at most one provider call and
///   reports every failure as an `Err`.
/// - [`PriceService::resolve_price`] never fails: any error is replaced
///   by the asset class's fallback price.
///
/// The rate limiter is shared (`Arc`), so several services, or a service
/// and a background price feed, draw from the same window.
pub struct PriceService {
    registry: PriceProviderRegistry,
    rate_limiter: Arc<RateLimiter>,
    request_timeout: Duration,
}

impl PriceService {
    pub fn new(
        registry: PriceProviderRegistry,
        rate_limiter: Arc<RateLimiter>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            rate_limiter,
            request_timeout,
        }
    }

    /// Default providers and a fresh rate limiter, configured from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            PriceProviderRegistry::new_with_defaults(settings),
            Arc::new(RateLimiter::new(
                settings.rate_limit_max_calls,
                settings.rate_limit_window(),
            )),
            settings.request_timeout(),
        )
    }

    /// Check if a provider is registered for a given asset type.
    pub fn has_provider_for(&self, asset_type: &AssetType) -> bool {
        self.registry.get_provider_for(asset_type).is_some()
    }

    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.rate_limiter
    }

    /// Fetch a live price with a single provider call.
    ///
    /// Fails without touching the network when no provider is registered
    /// for the class or the rate-limit window is exhausted. The call is
    /// bounded by the request timeout even if the provider never answers.
    /// Validates that returned prices are finite and non-negative.
    pub async fn fetch_price(
        &self,
        asset_type: AssetType,
        symbol: &str,
    ) -> Result<f64, CoreError> {
        let provider = self
            .registry
            .get_provider_for(&asset_type)
            .ok_or_else(|| CoreError::NoProvider(asset_type.to_string()))?;

        self.rate_limiter.try_acquire()?;

        let price = tokio::time::timeout(self.request_timeout, provider.get_current_price(symbol))
            .await
            .map_err(|_| {
                CoreError::Timeout(format!(
                    "{} did not answer for {symbol} within {}s",
                    provider.name(),
                    self.request_timeout.as_secs()
                ))
            })??;

        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::Api {
                provider: provider.name().to_string(),
                message: format!(
                    "Invalid price returned for {symbol}: {price} (must be finite and non-negative)"
                ),
            });
        }

        debug!(provider = provider.name(), %symbol, price, "live price");
        Ok(price)
    }

    /// Current unit price of `symbol`, falling back to the static table on
    /// any failure. Surrounding whitespace is ignored; a blank symbol
    /// resolves to `0.0` without a lookup.
    pub async fn resolve_price(&self, asset_type: AssetType, symbol: &str) -> f64 {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            warn!(%asset_type, "no symbol provided for price lookup");
            return 0.0;
        }

        match self.fetch_price(asset_type, symbol).await {
            Ok(price) => price,
            Err(e) => {
                let fallback = fallback_price(asset_type, symbol);
                warn!(%asset_type, %symbol, fallback, error = %e, "using fallback price");
                fallback
            }
        }
    }

    /// Resolve prices for a whole snapshot, keyed by asset id.
    ///
    /// All lookups run concurrently. Each one falls back on its own, so a
    /// failing asset never affects the others.
    pub async fn resolve_prices(&self, assets: &[Asset]) -> PriceMap {
        let lookups = assets.iter().map(|asset| async move {
            let price = self.resolve_price(asset.asset_type, &asset.name).await;
            (asset.id, price)
        });

        join_all(lookups).await.into_iter().collect()
    }
}
