use chrono::{Datelike, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::fallback::{fallback_price, FallbackTable};
use portfolio_tracker_core::models::asset::{Asset, AssetType, NewAsset};
use portfolio_tracker_core::models::filter::{AssetFilter, TypeCounts};
use portfolio_tracker_core::models::price::PriceMap;
use portfolio_tracker_core::models::settings::{Settings, DEFAULT_FINNHUB_URL};

// ═══════════════════════════════════════════════════════════════════
//  AssetType
// ═══════════════════════════════════════════════════════════════════

mod asset_type {
    use super::*;

    #[test]
    fn display_is_lowercase() {
        assert_eq!(AssetType::Stock.to_string(), "stock");
        assert_eq!(AssetType::Bond.to_string(), "bond");
        assert_eq!(AssetType::Crypto.to_string(), "crypto");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(AssetType::from_type_str("Crypto"), AssetType::Crypto);
        assert_eq!(AssetType::from_type_str("BOND"), AssetType::Bond);
        assert_eq!(AssetType::from_type_str(" bond "), AssetType::Bond);
        assert_eq!(AssetType::from_type_str("stock"), AssetType::Stock);
    }

    #[test]
    fn unknown_types_become_stock() {
        assert_eq!(AssetType::from_type_str("etf"), AssetType::Stock);
        assert_eq!(AssetType::from_type_str(""), AssetType::Stock);
        assert_eq!(AssetType::from("commodity"), AssetType::Stock);
    }

    #[test]
    fn default_is_stock() {
        assert_eq!(AssetType::default(), AssetType::Stock);
    }

    #[test]
    fn serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&AssetType::Crypto).unwrap(), "\"crypto\"");
    }

    #[test]
    fn deserializes_leniently() {
        let t: AssetType = serde_json::from_str("\"CRYPTO\"").unwrap();
        assert_eq!(t, AssetType::Crypto);
        let t: AssetType = serde_json::from_str("\"real-estate\"").unwrap();
        assert_eq!(t, AssetType::Stock);
        let t: AssetType = serde_json::from_str("null").unwrap();
        assert_eq!(t, AssetType::Stock);
    }

    #[test]
    fn all_lists_each_class_once() {
        let set: HashSet<AssetType> = AssetType::ALL.into_iter().collect();
        assert_eq!(set.len(), 3);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Asset
// ═══════════════════════════════════════════════════════════════════

mod asset {
    use super::*;

    #[test]
    fn decodes_store_record() {
        let json = r#"{
            "name": "AAPL",
            "type": "Stock",
            "purchasePrice": 100.0,
            "quantity": 2,
            "amountInvested": 200.0,
            "createdAt": "2020-03-01T12:00:00.000Z"
        }"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.name, "AAPL");
        assert_eq!(asset.asset_type, AssetType::Stock);
        assert_eq!(asset.purchase_price, 100.0);
        assert_eq!(asset.quantity, 2.0);
        assert_eq!(asset.amount_invested, 200.0);
        assert_eq!(asset.created_at.unwrap().year(), 2020);
        assert!(asset.id.is_nil());
    }

    #[test]
    fn missing_fields_default() {
        let asset: Asset = serde_json::from_str(r#"{"name": "BTC"}"#).unwrap();
        assert_eq!(asset.asset_type, AssetType::Stock);
        assert_eq!(asset.purchase_price, 0.0);
        assert_eq!(asset.quantity, 0.0);
        assert_eq!(asset.amount_invested, 0.0);
        assert!(asset.created_at.is_none());
    }

    #[test]
    fn missing_name_is_rejected() {
        let result = serde_json::from_str::<Asset>(r#"{"type": "stock"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serializes_camel_case_without_id() {
        let asset = Asset {
            id: Uuid::new_v4(),
            name: "ETH".into(),
            asset_type: AssetType::Crypto,
            purchase_price: 2000.0,
            quantity: 0.5,
            amount_invested: 1000.0,
            created_at: None,
        };
        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(value["type"], "crypto");
        assert_eq!(value["purchasePrice"], 2000.0);
        assert_eq!(value["amountInvested"], 1000.0);
        assert!(value.get("id").is_none());
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn with_id_sets_key() {
        let id = Uuid::new_v4();
        let asset: Asset = serde_json::from_str(r#"{"name": "X"}"#).unwrap();
        assert_eq!(asset.with_id(id).id, id);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  NewAsset
// ═══════════════════════════════════════════════════════════════════

mod new_asset {
    use super::*;

    #[test]
    fn convenience_constructors_set_type() {
        assert_eq!(NewAsset::stock("aapl", 1.0, 1.0).asset_type, AssetType::Stock);
        assert_eq!(NewAsset::bond("us10y", 1.0, 1.0).asset_type, AssetType::Bond);
        assert_eq!(NewAsset::crypto("btc", 1.0, 1.0).asset_type, AssetType::Crypto);
    }

    #[test]
    fn keeps_raw_name_until_built() {
        let input = NewAsset::stock(" aapl ", 1.0, 1.0);
        assert_eq!(input.name, " aapl ");
        assert!(input.created_at.is_none());
    }

    #[test]
    fn created_at_builder() {
        let at = Utc.with_ymd_and_hms(2019, 5, 1, 0, 0, 0).unwrap();
        let input = NewAsset::crypto("btc", 1.0, 1.0).created_at(at);
        assert_eq!(input.created_at, Some(at));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PriceMap
// ═══════════════════════════════════════════════════════════════════

mod price_map {
    use super::*;

    #[test]
    fn missing_price_is_zero() {
        let map = PriceMap::new();
        assert_eq!(map.get(&Uuid::new_v4()), None);
        assert_eq!(map.price_or_zero(&Uuid::new_v4()), 0.0);
        assert!(map.is_empty());
    }

    #[test]
    fn set_overwrites_same_key() {
        let id = Uuid::new_v4();
        let mut map = PriceMap::new();
        map.set(id, 1.0);
        map.set(id, 2.0);
        assert_eq!(map.get(&id), Some(2.0));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn merge_is_per_key() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut map: PriceMap = [(a, 1.0), (b, 2.0)].into_iter().collect();
        map.merge([(b, 20.0), (c, 30.0)].into_iter().collect());
        assert_eq!(map.get(&a), Some(1.0));
        assert_eq!(map.get(&b), Some(20.0));
        assert_eq!(map.get(&c), Some(30.0));
    }

    #[test]
    fn retain_ids_drops_others() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut map: PriceMap = [(a, 1.0), (b, 2.0)].into_iter().collect();
        map.retain_ids(&HashSet::from([a]));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&a), Some(1.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Fallback tables
// ═══════════════════════════════════════════════════════════════════

mod fallback {
    use super::*;

    #[test]
    fn stock_table_values() {
        assert_eq!(fallback_price(AssetType::Stock, "AAPL"), 150.0);
        assert_eq!(fallback_price(AssetType::Stock, "GOOGL"), 2800.0);
        assert_eq!(fallback_price(AssetType::Stock, "TEST"), 100.0);
    }

    #[test]
    fn crypto_table_values() {
        assert_eq!(fallback_price(AssetType::Crypto, "BTC"), 45000.0);
        assert_eq!(fallback_price(AssetType::Crypto, "DOGE"), 0.15);
        assert_eq!(fallback_price(AssetType::Crypto, "TRX"), 0.1);
    }

    #[test]
    fn bond_table_values() {
        assert_eq!(fallback_price(AssetType::Bond, "US10Y"), 1.5);
        assert_eq!(fallback_price(AssetType::Bond, "US2Y"), 0.5);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(fallback_price(AssetType::Crypto, "eth"), 3000.0);
        assert_eq!(fallback_price(AssetType::Bond, "us30y"), 2.0);
    }

    #[test]
    fn unlisted_symbols_use_class_default() {
        assert_eq!(fallback_price(AssetType::Stock, "ZZZZ"), 50.0);
        assert_eq!(fallback_price(AssetType::Crypto, "PEPE"), 10.0);
        assert_eq!(fallback_price(AssetType::Bond, "DE10Y"), 1.0);
    }

    #[test]
    fn tables_are_per_class() {
        // BTC is only listed in the crypto table
        assert_eq!(FallbackTable::for_type(AssetType::Stock).lookup("BTC"), None);
        assert_eq!(FallbackTable::for_type(AssetType::Crypto).lookup("BTC"), Some(45000.0));
    }

    #[test]
    fn table_sizes() {
        assert_eq!(FallbackTable::for_type(AssetType::Stock).symbols().count(), 9);
        assert_eq!(FallbackTable::for_type(AssetType::Crypto).symbols().count(), 20);
        assert_eq!(FallbackTable::for_type(AssetType::Bond).symbols().count(), 4);
    }

    #[test]
    fn defaults_are_distinct() {
        let defaults: Vec<f64> = AssetType::ALL
            .iter()
            .map(|t| FallbackTable::for_type(*t).default_price())
            .collect();
        assert_eq!(defaults, vec![50.0, 1.0, 10.0]);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Filters
// ═══════════════════════════════════════════════════════════════════

mod filter {
    use super::*;

    #[test]
    fn all_matches_everything() {
        for t in AssetType::ALL {
            assert!(AssetFilter::All.matches(t));
        }
    }

    #[test]
    fn class_filter_matches_only_its_class() {
        assert!(AssetFilter::Bond.matches(AssetType::Bond));
        assert!(!AssetFilter::Bond.matches(AssetType::Stock));
        assert!(!AssetFilter::Crypto.matches(AssetType::Bond));
    }

    #[test]
    fn from_asset_type() {
        assert_eq!(AssetFilter::from(AssetType::Crypto), AssetFilter::Crypto);
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&AssetFilter::All).unwrap(), "\"all\"");
        let f: AssetFilter = serde_json::from_str("\"bond\"").unwrap();
        assert_eq!(f, AssetFilter::Bond);
    }

    #[test]
    fn type_counts_accessors() {
        let counts = TypeCounts {
            stock: 2,
            bond: 1,
            crypto: 3,
        };
        assert_eq!(counts.get(AssetType::Crypto), 3);
        assert_eq!(counts.total(), 6);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert!(s.api_keys.is_empty());
        assert_eq!(s.finnhub_url, DEFAULT_FINNHUB_URL);
        assert_eq!(s.request_timeout_secs, 10);
        assert_eq!(s.rate_limit_max_calls, 30);
        assert_eq!(s.rate_limit_window_secs, 60);
        assert_eq!(s.inflation_rate, 0.03);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn no_variables_gives_defaults() {
        let s = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn reads_prefixed_variables() {
        let s = Settings::from_lookup(lookup(&[
            ("PORTFOLIO_FINNHUB_API_KEY", "fh-key"),
            ("PORTFOLIO_FMP_API_KEY", " fmp-key "),
            ("PORTFOLIO_COINGECKO_URL", "http://localhost:9000"),
            ("PORTFOLIO_RATE_LIMIT_MAX_CALLS", "5"),
            ("PORTFOLIO_RATE_LIMIT_WINDOW_SECS", "30"),
            ("PORTFOLIO_REQUEST_TIMEOUT_SECS", "3"),
            ("PORTFOLIO_INFLATION_RATE", "0.025"),
        ]))
        .unwrap();
        assert_eq!(s.api_key("finnhub"), Some("fh-key"));
        assert_eq!(s.api_key("fmp"), Some("fmp-key"));
        assert_eq!(s.coingecko_url, "http://localhost:9000");
        assert_eq!(s.rate_limit_max_calls, 5);
        assert_eq!(s.rate_limit_window().as_secs(), 30);
        assert_eq!(s.request_timeout().as_secs(), 3);
        assert_eq!(s.inflation_rate, 0.025);
    }

    #[test]
    fn unprefixed_variables_are_ignored() {
        let s = Settings::from_lookup(lookup(&[("FINNHUB_API_KEY", "x")])).unwrap();
        assert_eq!(s.api_key("finnhub"), None);
    }

    #[test]
    fn blank_values_are_ignored() {
        let s = Settings::from_lookup(lookup(&[("PORTFOLIO_FMP_API_KEY", "   ")])).unwrap();
        assert_eq!(s.api_key("fmp"), None);
    }

    #[test]
    fn malformed_number_is_config_error() {
        let err = Settings::from_lookup(lookup(&[("PORTFOLIO_RATE_LIMIT_MAX_CALLS", "lots")]))
            .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
        assert!(err.to_string().contains("PORTFOLIO_RATE_LIMIT_MAX_CALLS"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("PORTFOLIO_REQUEST_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn zero_window_is_rejected() {
        let s = Settings {
            rate_limit_window_secs: 0,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn non_finite_inflation_is_rejected() {
        let s = Settings {
            inflation_rate: f64::NAN,
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn json_roundtrip() {
        let mut s = Settings::default();
        s.api_keys.insert("finnhub".into(), "k".into());
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
