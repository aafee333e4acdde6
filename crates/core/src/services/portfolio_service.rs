use chrono::Utc;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::asset::{Asset, AssetType, NewAsset};
use crate::models::filter::{AssetFilter, TypeCounts};

/// Validates new holdings and slices the asset list for views.
///
/// Pure business logic, no I/O. Easy to test.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Validate form input before anything reaches the store.
    ///
    /// Rules:
    /// - Symbol must not be blank
    /// - Purchase price and quantity must be finite and positive
    pub fn validate_new_asset(&self, input: &NewAsset) -> Result<(), CoreError> {
        if input.name.trim().is_empty() {
            return Err(CoreError::ValidationError("Asset symbol is required".into()));
        }
        if !input.purchase_price.is_finite() || input.purchase_price <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Purchase price must be a positive number, got {}",
                input.purchase_price
            )));
        }
        if !input.quantity.is_finite() || input.quantity <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Quantity must be a positive number, got {}",
                input.quantity
            )));
        }
        Ok(())
    }

    /// Build the record to store from validated input.
    ///
    /// The symbol is trimmed and uppercased and `amount_invested` is fixed
    /// here, once. The id is a placeholder until the store assigns one.
    pub fn build_asset(&self, input: NewAsset) -> Result<Asset, CoreError> {
        self.validate_new_asset(&input)?;

        Ok(Asset {
            id: Uuid::nil(),
            name: input.name.trim().to_uppercase(),
            asset_type: input.asset_type,
            purchase_price: input.purchase_price,
            quantity: input.quantity,
            amount_invested: input.purchase_price * input.quantity,
            created_at: Some(input.created_at.unwrap_or_else(Utc::now)),
        })
    }

    /// Assets matching `filter`, in their original order.
    pub fn filter_assets<'a>(&self, assets: &'a [Asset], filter: AssetFilter) -> Vec<&'a Asset> {
        assets
            .iter()
            .filter(|a| filter.matches(a.asset_type))
            .collect()
    }

    /// Count assets per class.
    pub fn type_counts(&self, assets: &[Asset]) -> TypeCounts {
        assets.iter().fold(TypeCounts::default(), |mut counts, a| {
            match a.asset_type {
                AssetType::Stock => counts.stock += 1,
                AssetType::Bond => counts.bond += 1,
                AssetType::Crypto => counts.crypto += 1,
            }
            counts
        })
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
