use serde::{Deserialize, Serialize};

use super::asset::AssetType;

/// One slice of the allocation pie.
///
/// The core generates these; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub asset_type: AssetType,

    /// Current value of all assets of this class
    pub value: f64,

    /// Share of the total current value, in percent
    pub allocation_pct: f64,
}

/// One bar of the invested-vs-current chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestedVsCurrent {
    /// Asset symbol (e.g., "AAPL", "BTC")
    pub name: String,

    pub invested: f64,

    pub current: f64,
}
