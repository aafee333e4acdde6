use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::traits::PriceProvider;
use crate::errors::CoreError;
use crate::models::asset::AssetType;
use crate::models::settings::DEFAULT_FINNHUB_URL;

const PROVIDER: &str = "Finnhub";

/// Finnhub API provider for stock/equity quotes.
///
/// - **Requires**: API key (set via settings as "finnhub").
/// - **Endpoint**: `/quote?symbol={SYMBOL}&token={key}`
/// - **Coverage**: US equities and ETFs.
///
/// Finnhub answers unknown symbols with a zeroed quote instead of an
/// error, so a current price of `0` counts as "no data".
pub struct FinnhubProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FinnhubProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_config(DEFAULT_FINNHUB_URL, api_key, Duration::from_secs(10))
    }

    pub fn with_config(base_url: &str, api_key: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Extract the current price (`c`) from a `/quote` response body.
    pub fn parse_quote(body: &str, symbol: &str) -> Result<f64, CoreError> {
        let quote: QuoteResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse quote for {symbol}: {e}"),
        })?;

        match quote.current {
            Some(price) if price != 0.0 => Ok(price),
            _ => Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("No price data for {symbol}"),
            }),
        }
    }
}

// ── Finnhub API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct QuoteResponse {
    /// Current price
    #[serde(rename = "c")]
    current: Option<f64>,
}

#[async_trait]
impl PriceProvider for FinnhubProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn supported_asset_types(&self) -> Vec<AssetType> {
        vec![AssetType::Stock]
    }

    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        let symbol = symbol.to_uppercase();
        debug!(provider = PROVIDER, %symbol, "fetching stock quote");

        let body = self
            .client
            .get(format!("{}/quote", self.base_url))
            .query(&[("symbol", symbol.as_str()), ("token", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::parse_quote(&body, &symbol)
    }
}
