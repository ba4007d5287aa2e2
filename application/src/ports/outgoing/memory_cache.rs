use domain::{product::ProductId, tile::TileAddress};
use std::sync::Arc;

/// Bounded in-process cache of encoded tile bytes, keyed by address.
#[async_trait::async_trait]
pub trait MemoryCachePort: Send + Sync {
    async fn get(&self, address: &TileAddress) -> Option<Vec<u8>>;

    async fn insert(&self, address: TileAddress, data: Vec<u8>);

    async fn invalidate_product(&self, product: &ProductId);

    fn entry_count(&self) -> u64;
}

pub type DynMemoryCachePort = Arc<dyn MemoryCachePort>;
