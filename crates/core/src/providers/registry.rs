use tracing::warn;

use crate::models::asset::AssetType;
use crate::models::settings::Settings;

use super::coingecko::CoinGeckoProvider;
use super::finnhub::FinnhubProvider;
use super::fmp::FmpProvider;
use super::traits::PriceProvider;

/// Registry of all available price providers.
///
/// Routes requests to the correct provider based on `AssetType`.
/// Supporting a new asset class means registering one more provider.
pub struct PriceProviderRegistry {
    providers: Vec<Box<dyn PriceProvider>>,
}

impl PriceProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with the default providers, configured from `settings`.
    pub fn new_with_defaults(settings: &Settings) -> Self {
        let mut registry = Self::new();
        let timeout = settings.request_timeout();

        // Finnhub: stocks, requires API key
        if let Some(key) = settings.api_key("finnhub") {
            registry.register(Box::new(FinnhubProvider::with_config(
                &settings.finnhub_url,
                key.to_string(),
                timeout,
            )));
        }

        // CoinGecko: crypto, no API key needed
        registry.register(Box::new(CoinGeckoProvider::with_config(
            &settings.coingecko_url,
            timeout,
        )));

        // Financial Modeling Prep: treasury bonds, requires API key
        if let Some(key) = settings.api_key("fmp") {
            registry.register(Box::new(FmpProvider::with_config(
                &settings.fmp_url,
                key.to_string(),
                timeout,
            )));
        }

        for asset_type in registry.unserved_asset_types() {
            warn!(
                %asset_type,
                "no price provider configured (missing API key?); all lookups will use fallback prices"
            );
        }

        registry
    }

    /// Register a new price provider.
    pub fn register(&mut self, provider: Box<dyn PriceProvider>) {
        self.providers.push(provider);
    }

    /// Find the first provider that supports the given asset type.
    pub fn get_provider_for(&self, asset_type: &AssetType) -> Option<&dyn PriceProvider> {
        self.providers
            .iter()
            .find(|p| p.supported_asset_types().contains(asset_type))
            .map(|p| p.as_ref())
    }

    /// Asset classes no registered provider supports.
    pub fn unserved_asset_types(&self) -> Vec<AssetType> {
        AssetType::ALL
            .into_iter()
            .filter(|t| self.get_provider_for(t).is_none())
            .collect()
    }

    /// Names of all registered providers, in registration order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }
}

impl Default for PriceProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
