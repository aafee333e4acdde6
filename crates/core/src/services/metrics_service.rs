use chrono::{Datelike, Utc};

use crate::models::asset::{Asset, AssetType};
use crate::models::metrics::{
    AssetMetrics, AssetTimeValue, ClassSummary, GainLoss, OverallSummary, PortfolioBreakdown,
    TimeValueResult,
};
use crate::models::price::PriceMap;

/// Assumed annual inflation when none is configured.
pub const DEFAULT_INFLATION_RATE: f64 = 0.03;

/// Years before the current year assumed for assets without `created_at`.
const UNKNOWN_PURCHASE_YEARS_AGO: i32 = 5;

/// Computes portfolio metrics: gain/loss, per-class aggregates, real returns.
///
/// Pure business logic: no I/O, no state. Every method recomputes from
/// the `(assets, prices)` it is given, so callers re-run it whenever the
/// asset set, the price map or the target year changes.
#[derive(Debug, Clone)]
pub struct MetricsService {
    inflation_rate: f64,
}

impl MetricsService {
    pub fn new() -> Self {
        Self::with_inflation_rate(DEFAULT_INFLATION_RATE)
    }

    pub fn with_inflation_rate(inflation_rate: f64) -> Self {
        Self { inflation_rate }
    }

    pub fn inflation_rate(&self) -> f64 {
        self.inflation_rate
    }

    /// Gain/loss of one position.
    ///
    /// Returns `None` when any input is zero or not a finite number: a zero
    /// purchase price or quantity suppresses the metric instead of
    /// producing a degenerate percentage.
    pub fn compute_gain_loss(
        &self,
        purchase_price: f64,
        current_price: f64,
        quantity: f64,
    ) -> Option<GainLoss> {
        let usable = |v: f64| v.is_finite() && v != 0.0;
        if !usable(purchase_price) || !usable(current_price) || !usable(quantity) {
            return None;
        }

        let total_invested = purchase_price * quantity;
        let current_value = current_price * quantity;
        let gain_loss = current_value - total_invested;

        Some(GainLoss {
            total_invested,
            current_value,
            gain_loss,
            percentage: (gain_loss / total_invested) * 100.0,
        })
    }

    /// Split the portfolio into stocks, bonds and crypto and total each class.
    ///
    /// `total_invested` sums the stored `amount_invested`; `current_value`
    /// and `gain_loss` sum the per-asset gain/loss (absent counts as 0).
    pub fn compute_portfolio_breakdown(
        &self,
        assets: &[Asset],
        prices: &PriceMap,
    ) -> PortfolioBreakdown {
        let mut breakdown = PortfolioBreakdown::default();

        for asset in assets {
            let current_price = prices.price_or_zero(&asset.id);
            let gain_loss =
                self.compute_gain_loss(asset.purchase_price, current_price, asset.quantity);

            let class = match asset.asset_type {
                AssetType::Stock => &mut breakdown.stocks,
                AssetType::Bond => &mut breakdown.bonds,
                AssetType::Crypto => &mut breakdown.crypto,
            };

            class.total_invested += asset.amount_invested;
            class.current_value += gain_loss.map_or(0.0, |g| g.current_value);
            class.gain_loss += gain_loss.map_or(0.0, |g| g.gain_loss);
            class.assets.push(AssetMetrics {
                asset: asset.clone(),
                current_price,
                gain_loss,
            });
        }

        for class in [
            &mut breakdown.stocks,
            &mut breakdown.bonds,
            &mut breakdown.crypto,
        ] {
            class.percentage = percent_of(class.gain_loss, class.total_invested);
        }

        breakdown.overall = Self::sum_classes(&[
            &breakdown.stocks,
            &breakdown.bonds,
            &breakdown.crypto,
        ]);
        breakdown
    }

    /// Totals for an arbitrary (typically filtered) list of assets.
    ///
    /// Unlike the class breakdown, current value here is simply
    /// `price × quantity` for every asset, including those whose gain/loss
    /// is suppressed.
    pub fn compute_overall_metrics(&self, assets: &[Asset], prices: &PriceMap) -> OverallSummary {
        let total_invested: f64 = assets.iter().map(|a| a.amount_invested).sum();
        let current_value: f64 = assets
            .iter()
            .map(|a| prices.price_or_zero(&a.id) * a.quantity)
            .sum();
        let gain_loss = current_value - total_invested;

        OverallSummary {
            total_invested,
            current_value,
            gain_loss,
            percentage: percent_of(gain_loss, total_invested),
        }
    }

    /// Inflation-adjusted ("real") gain/loss for `target_year`
    /// (defaults to the current year).
    pub fn compute_time_value(
        &self,
        assets: &[Asset],
        prices: &PriceMap,
        target_year: Option<i32>,
    ) -> TimeValueResult {
        let current_year = Utc::now().year();
        self.compute_time_value_at(
            assets,
            prices,
            target_year.unwrap_or(current_year),
            current_year,
        )
    }

    /// [`MetricsService::compute_time_value`] with an explicit current year.
    ///
    /// Each asset's investment is compounded from its purchase year to
    /// `target_year`. A target before the purchase year gives a negative
    /// exponent and a smaller adjusted value; that is intended. Year
    /// differences saturate at the `i32` bounds.
    pub fn compute_time_value_at(
        &self,
        assets: &[Asset],
        prices: &PriceMap,
        target_year: i32,
        current_year: i32,
    ) -> TimeValueResult {
        let growth = 1.0 + self.inflation_rate;

        let rows: Vec<AssetTimeValue> = assets
            .iter()
            .map(|asset| {
                let investment_year = asset
                    .created_at
                    .map(|at| at.year())
                    .unwrap_or_else(|| current_year.saturating_sub(UNKNOWN_PURCHASE_YEARS_AGO));
                let years_elapsed = target_year.saturating_sub(investment_year);
                let original_value = asset.amount_invested;

                AssetTimeValue {
                    name: asset.name.clone(),
                    original_value,
                    inflation_adjusted_value: original_value * growth.powi(years_elapsed),
                    current_value: prices.price_or_zero(&asset.id) * asset.quantity,
                    years_elapsed,
                }
            })
            .collect();

        let total_original_value: f64 = rows.iter().map(|r| r.original_value).sum();
        let total_inflation_adjusted_value: f64 =
            rows.iter().map(|r| r.inflation_adjusted_value).sum();
        let total_current_value: f64 = rows.iter().map(|r| r.current_value).sum();
        let total_real_gain_loss = total_current_value - total_inflation_adjusted_value;

        TimeValueResult {
            total_original_value,
            total_inflation_adjusted_value,
            total_current_value,
            total_real_gain_loss,
            total_real_percentage: percent_of(total_real_gain_loss, total_inflation_adjusted_value),
            target_year,
            assets: rows,
        }
    }

    fn sum_classes(classes: &[&ClassSummary]) -> OverallSummary {
        let total_invested: f64 = classes.iter().map(|c| c.total_invested).sum();
        let current_value: f64 = classes.iter().map(|c| c.current_value).sum();
        let gain_loss: f64 = classes.iter().map(|c| c.gain_loss).sum();

        OverallSummary {
            total_invested,
            current_value,
            gain_loss,
            percentage: percent_of(gain_loss, total_invested),
        }
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

/// `part / whole × 100`, or 0 when `whole` is not positive.
pub(crate) fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        let pct = (part / whole) * 100.0;
        if pct.is_finite() {
            pct
        } else {
            0.0
        }
    } else {
        0.0
    }
}
