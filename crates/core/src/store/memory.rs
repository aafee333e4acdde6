use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use super::traits::{AssetStore, Subscription};
use crate::errors::CoreError;
use crate::models::asset::Asset;

/// In-process [`AssetStore`] keeping records in insertion order.
///
/// Every write publishes its snapshot while still holding the record
/// lock, so subscribers never observe snapshots out of write order.
#[derive(Debug)]
pub struct MemoryAssetStore {
    records: Mutex<Vec<Asset>>,
    snapshots: watch::Sender<Vec<Asset>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// A store pre-populated with `records`, keeping their ids.
    pub fn with_records(records: Vec<Asset>) -> Self {
        let (snapshots, _) = watch::channel(records.clone());
        Self {
            records: Mutex::new(records),
            snapshots,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of subscriptions that have not been dropped yet.
    pub fn subscriber_count(&self) -> usize {
        self.snapshots.receiver_count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Asset>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Publish the current records. Works with zero subscribers too.
    fn publish(&self, records: &[Asset]) {
        self.snapshots.send_replace(records.to_vec());
    }
}

impl Default for MemoryAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn create(&self, asset: Asset) -> Result<Uuid, CoreError> {
        let id = Uuid::new_v4();
        let mut records = self.lock();
        info!(%id, name = %asset.name, asset_type = %asset.asset_type, "asset created");
        records.push(asset.with_id(id));
        self.publish(&records);
        Ok(id)
    }

    async fn delete(&self, id: Uuid) -> Result<(), CoreError> {
        let mut records = self.lock();
        let idx = records
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| CoreError::AssetNotFound(id.to_string()))?;
        let removed = records.remove(idx);
        info!(%id, name = %removed.name, "asset deleted");
        self.publish(&records);
        Ok(())
    }

    async fn fetch_once(&self) -> Result<Vec<Asset>, CoreError> {
        Ok(self.lock().clone())
    }

    fn subscribe(&self) -> Subscription {
        Subscription::new(self.snapshots.subscribe())
    }
}
