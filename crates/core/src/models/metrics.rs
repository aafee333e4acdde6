use serde::{Deserialize, Serialize};

use super::asset::Asset;

/// Gain/loss of a single position at a given unit price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GainLoss {
    /// purchase_price × quantity
    pub total_invested: f64,

    /// current_price × quantity
    pub current_value: f64,

    /// current_value − total_invested
    pub gain_loss: f64,

    /// (gain_loss / total_invested) × 100
    pub percentage: f64,
}

/// An asset as it appears inside a class breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetrics {
    pub asset: Asset,

    /// Resolved unit price, `0.0` when no price was available
    pub current_price: f64,

    /// `None` when any of price, current price or quantity is zero
    pub gain_loss: Option<GainLoss>,
}

/// Aggregate for one asset class (stocks, bonds or crypto).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub assets: Vec<AssetMetrics>,

    /// Sum of the stored `amount_invested` of every asset in the class
    pub total_invested: f64,

    /// Sum of per-asset current values (assets without gain/loss add 0)
    pub current_value: f64,

    pub gain_loss: f64,

    /// 0 when nothing is invested
    pub percentage: f64,
}

/// Portfolio-wide totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    pub total_invested: f64,
    pub current_value: f64,
    pub gain_loss: f64,
    pub percentage: f64,
}

/// Per-class breakdown of the whole portfolio, plus the grand total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioBreakdown {
    pub stocks: ClassSummary,
    pub bonds: ClassSummary,
    pub crypto: ClassSummary,
    pub overall: OverallSummary,
}

/// One row of the inflation adjustment, kept for transparency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTimeValue {
    pub name: String,
    pub original_value: f64,
    pub inflation_adjusted_value: f64,
    pub current_value: f64,

    /// Negative when the target year precedes the investment year
    pub years_elapsed: i32,
}

/// Real (inflation-adjusted) gain/loss of the portfolio for a target year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeValueResult {
    pub total_original_value: f64,
    pub total_inflation_adjusted_value: f64,
    pub total_current_value: f64,

    /// total_current_value − total_inflation_adjusted_value
    pub total_real_gain_loss: f64,

    /// 0 when the inflation-adjusted value is not positive
    pub total_real_percentage: f64,

    pub target_year: i32,

    pub assets: Vec<AssetTimeValue>,
}
