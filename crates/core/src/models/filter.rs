use serde::{Deserialize, Serialize};

use super::asset::AssetType;

/// Which asset classes a view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFilter {
    #[default]
    All,
    Stock,
    Bond,
    Crypto,
}

impl AssetFilter {
    pub fn matches(&self, asset_type: AssetType) -> bool {
        match self {
            AssetFilter::All => true,
            AssetFilter::Stock => asset_type == AssetType::Stock,
            AssetFilter::Bond => asset_type == AssetType::Bond,
            AssetFilter::Crypto => asset_type == AssetType::Crypto,
        }
    }
}

impl From<AssetType> for AssetFilter {
    fn from(asset_type: AssetType) -> Self {
        match asset_type {
            AssetType::Stock => AssetFilter::Stock,
            AssetType::Bond => AssetFilter::Bond,
            AssetType::Crypto => AssetFilter::Crypto,
        }
    }
}

/// Number of assets per class, for the filter buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub stock: usize,
    pub bond: usize,
    pub crypto: usize,
}

impl TypeCounts {
    pub fn get(&self, asset_type: AssetType) -> usize {
        match asset_type {
            AssetType::Stock => self.stock,
            AssetType::Bond => self.bond,
            AssetType::Crypto => self.crypto,
        }
    }

    pub fn total(&self) -> usize {
        self.stock + self.bond + self.crypto
    }
}
