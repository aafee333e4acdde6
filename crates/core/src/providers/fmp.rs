use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::traits::PriceProvider;
use crate::errors::CoreError;
use crate::models::asset::AssetType;
use crate::models::settings::DEFAULT_FMP_URL;

const PROVIDER: &str = "Financial Modeling Prep";

/// Financial Modeling Prep provider for treasury bond prices.
///
/// - **Requires**: API key (set via settings as "fmp").
/// - **Endpoint**: `/treasury?symbol={symbol}&apikey={key}`
///
/// The endpoint returns a list of records, newest first; only the first
/// record's `price` is used. On errors FMP answers with a JSON object
/// instead of a list, which fails to parse and is reported as such.
pub struct FmpProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FmpProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_config(DEFAULT_FMP_URL, api_key, Duration::from_secs(10))
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

    /// Extract the first record's `price` from a `/treasury` response body.
    pub fn parse_treasury(body: &str, symbol: &str) -> Result<f64, CoreError> {
        let records: Vec<TreasuryRecord> =
            serde_json::from_str(body).map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse treasury data for {symbol}: {e}"),
            })?;

        match records.first().and_then(|r| r.price) {
            Some(price) if price != 0.0 => Ok(price),
            _ => Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("No price data for {symbol}"),
            }),
        }
    }
}

// ── FMP API response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct TreasuryRecord {
    price: Option<f64>,
}

#[async_trait]
impl PriceProvider for FmpProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn supported_asset_types(&self) -> Vec<AssetType> {
        vec![AssetType::Bond]
    }

    async fn get_current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        debug!(provider = PROVIDER, %symbol, "fetching treasury price");

        let body = self
            .client
            .get(format!("{}/treasury", self.base_url))
            .query(&[("symbol", symbol), ("apikey", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::parse_treasury(&body, symbol)
    }
}
