use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::asset::Asset;

/// Keyed collection of asset records with change notification.
///
/// Records are only ever created or deleted, never updated in place.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store a new record. The store assigns and returns its id; any id
    /// already on `asset` is ignored.
    async fn create(&self, asset: Asset) -> Result<Uuid, CoreError>;

    /// Remove a record by id.
    async fn delete(&self, id: Uuid) -> Result<(), CoreError>;

    /// Current records, once.
    async fn fetch_once(&self) -> Result<Vec<Asset>, CoreError>;

    /// Register for snapshots. The current snapshot is delivered first,
    /// then the latest full snapshot after writes. A subscriber that falls
    /// behind skips straight to the newest snapshot.
    fn subscribe(&self) -> Subscription;
}

/// Handle to a store subscription. Dropping it unsubscribes.
///
/// Holds at most one pending snapshot however many writes happen
/// between polls.
#[derive(Debug)]
pub struct Subscription {
    receiver: watch::Receiver<Vec<Asset>>,
}

impl Subscription {
    /// Wrap a receiver; its current value is delivered by the first `next`.
    pub fn new(mut receiver: watch::Receiver<Vec<Asset>>) -> Self {
        receiver.mark_changed();
        Self { receiver }
    }

    /// Wait for the next snapshot. `None` once the store is gone.
    pub async fn next(&mut self) -> Option<Vec<Asset>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Latest snapshot if one arrived since the last poll.
    pub fn try_next(&mut self) -> Option<Vec<Asset>> {
        match self.receiver.has_changed() {
            Ok(true) => Some(self.receiver.borrow_and_update().clone()),
            _ => None,
        }
    }

    /// Stop receiving snapshots.
    pub fn unsubscribe(self) {
        drop(self);
    }
}
