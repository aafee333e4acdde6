use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Current unit price per asset id.
///
/// Ephemeral: rebuilt on every fetch cycle and never persisted. Each
/// lookup writes only its own key, so results from overlapping cycles
/// merge per asset (last writer wins for that key).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceMap {
    pub prices: HashMap<Uuid, f64>,
}

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &Uuid) -> Option<f64> {
        self.prices.get(id).copied()
    }

    /// Price for an asset, `0.0` when none has been resolved yet.
    pub fn price_or_zero(&self, id: &Uuid) -> f64 {
        self.get(id).unwrap_or(0.0)
    }

    pub fn set(&mut self, id: Uuid, price: f64) {
        self.prices.insert(id, price);
    }

    /// Merge another map into this one, key by key.
    pub fn merge(&mut self, other: PriceMap) {
        self.prices.extend(other.prices);
    }

    /// Drop prices for assets that are no longer present.
    pub fn retain_ids(&mut self, keep: &HashSet<Uuid>) {
        self.prices.retain(|id, _| keep.contains(id));
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl FromIterator<(Uuid, f64)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (Uuid, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}
