use thiserror::Error;

/// Unified error type for the entire portfolio-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("No provider available for asset type: {0}")]
    NoProvider(String),

    #[error("Rate limit reached: {max_calls} calls per {window_secs}s window")]
    RateLimited { max_calls: u32, window_secs: u64 },

    // ── Asset Store ─────────────────────────────────────────────────
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Asset validation failed: {0}")]
    ValidationError(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// True for failures that the price resolver recovers from with a fallback price.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CoreError::Api { .. }
                | CoreError::Network(_)
                | CoreError::Timeout(_)
                | CoreError::Deserialization(_)
                | CoreError::RateLimited { .. }
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL, and every provider puts its key in the query.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        if e.is_timeout() {
            CoreError::Timeout(sanitized)
        } else if e.is_decode() {
            CoreError::Deserialization(sanitized)
        } else {
            CoreError::Network(sanitized)
        }
    }
}
