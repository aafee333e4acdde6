use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::asset::Asset;
use crate::models::price::PriceMap;
use crate::services::price_service::PriceService;
use crate::store::Subscription;

/// Keeps a shared price map in step with store snapshots.
///
/// Each snapshot starts a fetch cycle. Cycles may overlap and finish out
/// of order: results are merged per asset id, and only the newest
/// snapshot seen so far decides which ids are kept. A slow, superseded
/// cycle can refresh prices of assets that still exist but never brings
/// back a deleted one.
pub struct PriceFeed {
    price_service: Arc<PriceService>,
    state: RwLock<FeedState>,
    next_generation: AtomicU64,
}

#[derive(Debug, Default)]
struct FeedState {
    prices: PriceMap,
    latest_generation: u64,
    latest_ids: HashSet<Uuid>,
}

impl PriceFeed {
    pub fn new(price_service: Arc<PriceService>) -> Self {
        Self {
            price_service,
            state: RwLock::new(FeedState::default()),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Copy of the current price map.
    pub async fn prices(&self) -> PriceMap {
        self.state.read().await.prices.clone()
    }

    /// Resolve prices for one snapshot and merge them in.
    /// Returns the merged map.
    pub async fn apply_snapshot(&self, assets: &[Asset]) -> PriceMap {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        let resolved = self.price_service.resolve_prices(assets).await;

        let mut guard = self.state.write().await;
        let state = &mut *guard;
        if generation >= state.latest_generation {
            state.latest_generation = generation;
            state.latest_ids = assets.iter().map(|a| a.id).collect();
            state.prices.retain_ids(&state.latest_ids);
        }

        for (id, price) in resolved.prices {
            if state.latest_ids.contains(&id) {
                state.prices.set(id, price);
            }
        }

        debug!(generation, assets = assets.len(), "price cycle merged");
        state.prices.clone()
    }

    /// Apply every snapshot from `subscription` until it closes.
    pub async fn run(&self, mut subscription: Subscription) {
        while let Some(snapshot) = subscription.next().await {
            self.apply_snapshot(&snapshot).await;
        }
    }
}
