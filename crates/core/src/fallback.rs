//! Last-known prices used whenever a live quote cannot be obtained.

use crate::models::asset::AssetType;

const STOCK_PRICES: &[(&str, f64)] = &[
    ("AAPL", 150.0),
    ("GOOGL", 2800.0),
    ("MSFT", 300.0),
    ("AMZN", 3300.0),
    ("TSLA", 800.0),
    ("META", 300.0),
    ("NVDA", 500.0),
    ("NFLX", 500.0),
    ("TEST", 100.0),
];

const CRYPTO_PRICES: &[(&str, f64)] = &[
    ("BTC", 45000.0),
    ("ETH", 3000.0),
    ("USDT", 1.0),
    ("BNB", 400.0),
    ("SOL", 100.0),
    ("ADA", 1.5),
    ("XRP", 0.8),
    ("DOT", 20.0),
    ("DOGE", 0.15),
    ("AVAX", 80.0),
    ("MATIC", 1.2),
    ("LINK", 20.0),
    ("UNI", 25.0),
    ("LTC", 150.0),
    ("BCH", 400.0),
    ("XLM", 0.3),
    ("ATOM", 30.0),
    ("ETC", 40.0),
    ("FIL", 50.0),
    ("TRX", 0.1),
];

const BOND_PRICES: &[(&str, f64)] = &[
    ("US10Y", 1.5),
    ("US30Y", 2.0),
    ("US5Y", 1.0),
    ("US2Y", 0.5),
];

/// Static fallback table for one asset class.
#[derive(Debug, Clone, Copy)]
pub struct FallbackTable {
    entries: &'static [(&'static str, f64)],
    default_price: f64,
}

impl FallbackTable {
    pub fn for_type(asset_type: AssetType) -> Self {
        match asset_type {
            AssetType::Stock => Self {
                entries: STOCK_PRICES,
                default_price: 50.0,
            },
            AssetType::Crypto => Self {
                entries: CRYPTO_PRICES,
                default_price: 10.0,
            },
            AssetType::Bond => Self {
                entries: BOND_PRICES,
                default_price: 1.0,
            },
        }
    }

    /// Table entry for `symbol` (case-insensitive), if listed.
    pub fn lookup(&self, symbol: &str) -> Option<f64> {
        let upper = symbol.trim().to_uppercase();
        self.entries
            .iter()
            .find(|(sym, _)| *sym == upper)
            .map(|(_, price)| *price)
    }

    /// Table entry for `symbol`, or the class default when unlisted.
    pub fn price(&self, symbol: &str) -> f64 {
        self.lookup(symbol).unwrap_or(self.default_price)
    }

    pub fn default_price(&self) -> f64 {
        self.default_price
    }

    pub fn symbols(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(sym, _)| *sym)
    }
}

/// Fallback price of `symbol` within its asset class.
pub fn fallback_price(asset_type: AssetType, symbol: &str) -> f64 {
    FallbackTable::for_type(asset_type).price(symbol)
}
