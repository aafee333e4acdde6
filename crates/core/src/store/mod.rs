pub mod memory;
pub mod snapshot;
pub mod traits;

pub use memory::MemoryAssetStore;
pub use snapshot::records_from_snapshot;
pub use traits::{AssetStore, Subscription};
