use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::CoreError;

pub const DEFAULT_FINNHUB_URL: &str = "https://finnhub.io/api/v1";
pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_FMP_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Environment variable prefix used by [`Settings::from_env`].
const ENV_PREFIX: &str = "PORTFOLIO_";

/// Runtime configuration for price providers, rate limiting and metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// API keys for providers that require them.
    /// Keys: provider name ("finnhub", "fmp"). Values: the API key string.
    pub api_keys: HashMap<String, String>,

    pub finnhub_url: String,
    pub coingecko_url: String,
    pub fmp_url: String,

    /// Timeout applied to every outbound quote request.
    pub request_timeout_secs: u64,

    /// Maximum number of quote requests per rate-limit window.
    pub rate_limit_max_calls: u32,

    /// Length of the fixed rate-limit window.
    pub rate_limit_window_secs: u64,

    /// Assumed annual inflation rate for real gain/loss (0.03 = 3%).
    pub inflation_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_keys: HashMap::new(),
            finnhub_url: DEFAULT_FINNHUB_URL.to_string(),
            coingecko_url: DEFAULT_COINGECKO_URL.to_string(),
            fmp_url: DEFAULT_FMP_URL.to_string(),
            request_timeout_secs: 10,
            rate_limit_max_calls: 30,
            rate_limit_window_secs: 60,
            inflation_rate: 0.03,
        }
    }
}

impl Settings {
    /// Defaults overlaid with `PORTFOLIO_*` environment variables.
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, CoreError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`], reading variables through `lookup`.
    ///
    /// Recognized (without the `PORTFOLIO_` prefix): `FINNHUB_API_KEY`,
    /// `FMP_API_KEY`, `FINNHUB_URL`, `COINGECKO_URL`, `FMP_URL`,
    /// `REQUEST_TIMEOUT_SECS`, `RATE_LIMIT_MAX_CALLS`,
    /// `RATE_LIMIT_WINDOW_SECS`, `INFLATION_RATE`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut settings = Self::default();

        if let Some(key) = get("FINNHUB_API_KEY") {
            settings.api_keys.insert("finnhub".into(), key);
        }
        if let Some(key) = get("FMP_API_KEY") {
            settings.api_keys.insert("fmp".into(), key);
        }
        if let Some(url) = get("FINNHUB_URL") {
            settings.finnhub_url = url;
        }
        if let Some(url) = get("COINGECKO_URL") {
            settings.coingecko_url = url;
        }
        if let Some(url) = get("FMP_URL") {
            settings.fmp_url = url;
        }
        if let Some(raw) = get("REQUEST_TIMEOUT_SECS") {
            settings.request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = get("RATE_LIMIT_MAX_CALLS") {
            settings.rate_limit_max_calls = parse_var("RATE_LIMIT_MAX_CALLS", &raw)?;
        }
        if let Some(raw) = get("RATE_LIMIT_WINDOW_SECS") {
            settings.rate_limit_window_secs = parse_var("RATE_LIMIT_WINDOW_SECS", &raw)?;
        }
        if let Some(raw) = get("INFLATION_RATE") {
            settings.inflation_rate = parse_var("INFLATION_RATE", &raw)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the rest of the library cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config("request timeout must be at least 1 second".into()));
        }
        if self.rate_limit_window_secs == 0 {
            return Err(CoreError::Config("rate-limit window must be at least 1 second".into()));
        }
        if !self.inflation_rate.is_finite() || self.inflation_rate <= -1.0 {
            return Err(CoreError::Config(format!(
                "inflation rate {} is out of range",
                self.inflation_rate
            )));
        }
        Ok(())
    }

    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys.get(provider).map(String::as_str)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, CoreError>
where
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e| {
        CoreError::Config(format!("{ENV_PREFIX}{name}={raw:?} is not valid: {e}"))
    })
}
