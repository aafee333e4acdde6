use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// The class of a tracked holding.
/// Determines which price provider and which fallback table are used.
///
/// Parsing is case-insensitive and never fails: anything that is not a
/// bond or crypto is treated as a stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AssetType {
    /// Stocks / equities (AAPL, MSFT, etc.), via Finnhub
    #[default]
    Stock,
    /// Treasury bonds (US10Y, US2Y, etc.), via Financial Modeling Prep
    Bond,
    /// Cryptocurrencies (BTC, ETH, etc.), via CoinGecko
    Crypto,
}

impl AssetType {
    pub const ALL: [AssetType; 3] = [AssetType::Stock, AssetType::Bond, AssetType::Crypto];

    /// Canonicalize a free-form type string ("Crypto", " BOND ", "etf", "").
    pub fn from_type_str(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "bond" => AssetType::Bond,
            "crypto" => AssetType::Crypto,
            _ => AssetType::Stock,
        }
    }

    /// Lowercase canonical name, as stored in asset records.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "stock",
            AssetType::Bond => "bond",
            AssetType::Crypto => "crypto",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for AssetType {
    fn from(raw: &str) -> Self {
        AssetType::from_type_str(raw)
    }
}

impl Serialize for AssetType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AssetType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(AssetType::from_type_str).unwrap_or_default())
    }
}

/// A stored holding.
///
/// Records are immutable once created. `amount_invested` is denormalized
/// at creation time and is the value every aggregate sums; it is never
/// recomputed from `purchase_price * quantity`.
///
/// Serialized in the camelCase layout used by the realtime store. Numeric
/// fields missing from a stored record decode as `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Store-assigned key. Not part of the stored value itself.
    #[serde(skip)]
    pub id: Uuid,

    /// Ticker symbol, uppercased (e.g., "AAPL", "BTC", "US10Y")
    pub name: String,

    #[serde(rename = "type", default)]
    pub asset_type: AssetType,

    #[serde(default)]
    pub purchase_price: f64,

    #[serde(default)]
    pub quantity: f64,

    #[serde(default)]
    pub amount_invested: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Asset {
    /// Attach the store key to a decoded record.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// Input for creating a new asset, as collected by the add-asset form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAsset {
    /// Raw symbol as typed; trimmed and uppercased when the record is built.
    pub name: String,
    pub asset_type: AssetType,
    pub purchase_price: f64,
    pub quantity: f64,
    /// Acquisition time. Defaults to "now" when the record is built.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewAsset {
    pub fn new(
        name: impl Into<String>,
        asset_type: AssetType,
        purchase_price: f64,
        quantity: f64,
    ) -> Self {
        Self {
            name: name.into(),
            asset_type,
            purchase_price,
            quantity,
            created_at: None,
        }
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Convenience constructors for each asset class
    pub fn stock(name: impl Into<String>, purchase_price: f64, quantity: f64) -> Self {
        Self::new(name, AssetType::Stock, purchase_price, quantity)
    }

    pub fn bond(name: impl Into<String>, purchase_price: f64, quantity: f64) -> Self {
        Self::new(name, AssetType::Bond, purchase_price, quantity)
    }

    pub fn crypto(name: impl Into<String>, purchase_price: f64, quantity: f64) -> Self {
        Self::new(name, AssetType::Crypto, purchase_price, quantity)
    }
}
