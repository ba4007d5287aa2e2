use crate::error::AppResult;
use domain::{
    product::{ProductId, TileFormat},
    tile::{CacheStats, TileKey},
};
use std::sync::Arc;

/// Durable tile storage. Writes must be atomic: a reader never observes a partial file.
#[async_trait::async_trait]
pub trait TileStorePort: Send + Sync {
    async fn exists(&self, key: &TileKey) -> AppResult<bool>;

    async fn read(&self, key: &TileKey) -> AppResult<Option<Vec<u8>>>;

    /// Overwrites any existing tile at `key`.
    async fn write(&self, key: &TileKey, data: &[u8]) -> AppResult<()>;

    /// Deletes every stored tile of the product and returns how many `format` tiles were removed.
    /// The product's storage location exists and is empty afterwards.
    async fn clear_product(&self, product: &ProductId, format: TileFormat) -> AppResult<u64>;

    async fn stats(&self, product: &ProductId, format: TileFormat) -> AppResult<CacheStats>;

    async fn prepare_product(&self, product: &ProductId) -> AppResult<()>;
}

pub type DynTileStorePort = Arc<dyn TileStorePort>;
