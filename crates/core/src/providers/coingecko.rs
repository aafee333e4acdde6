use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::traits::PriceProvider;
use crate::errors::CoreError;
use crate::models::asset::AssetType;
use crate::models::settings::DEFAULT_COINGECKO_URL;

const PROVIDER: &str = "CoinGecko";

/// Common ticker symbols mapped to CoinGecko coin ids.
const COMMON_IDS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("USDT", "tether"),
    ("BNB", "binancecoin"),
    ("SOL", "solana"),
    ("ADA", "cardano"),
    ("XRP", "ripple"),
    ("DOT", "polkadot"),
    ("DOGE", "dogecoin"),
    ("AVAX", "avalanche-2"),
    ("MATIC", "matic-network"),
    ("LINK", "chainlink"),
    ("UNI", "uniswap"),
    ("LTC", "litecoin"),
    ("BCH", "bitcoin-cash"),
    ("XLM", "stellar"),
    ("ATOM", "cosmos"),
    ("ETC", "ethereum-classic"),
    ("FIL", "filecoin"),
    ("TRX", "tron"),
];

/// CoinGecko API provider for cryptocurrency spot prices.
///
/// - **Free**: No API key required (public tier is rate limited).
/// - **Endpoint**: `/simple/price?ids={id}&vs_currencies=usd`
///
/// Note: CoinGecko uses lowercase ids like "bitcoin", "avalanche-2".
/// Common symbols are mapped; anything else is lowercased and sent as-is.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_COINGECKO_URL, Duration::from_secs(10))
    }

    pub fn with_config(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a symbol like "BTC" to a CoinGecko id like "bitcoin".
    pub fn resolve_id(symbol: &str) -> String {
        let upper = symbol.trim().to_uppercase();
        COMMON_IDS
            .iter()
            .find(|(sym, _)| *sym == upper)
            .map(|(_, id)| id.to_string())
            .unwrap_or_else(|| symbol.trim().to_lowercase())
    }

    /// Extract `{id}.usd` from a `/simple/price` response body.
    pub fn parse_price(body: &str, coin_id: &str) -> Result<f64, CoreError> {
        let resp: HashMap<String, CoinPrice> =
            serde_json::from_str(body).map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse price for {coin_id}: {e}"),
            })?;

        match resp.get(coin_id).and_then(|p| p.usd) {
            Some(price) if price != 0.0 => Ok(price),
            _ => Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("No price data for {coin_id}"),
            }),
        }
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct CoinPrice {
    usd: Option<f64>,
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn supported_asset_types(&self) -> Vec<AssetType> {
        vec![AssetType::Crypto]
    }

    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        let id = Self::resolve_id(symbol);
        debug!(provider = PROVIDER, %symbol, coin_id = %id, "fetching crypto price");

        let body = self
            .client
            .get(format!("{}/simple/price", self.base_url))
            .query(&[("ids", id.as_str()), ("vs_currencies", "usd")])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::parse_price(&body, &id)
    }
}
