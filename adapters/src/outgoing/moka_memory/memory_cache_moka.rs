use std::sync::Arc;

use domain::{product::ProductId, tile::TileAddress};
use lunar_tiles_application::ports::outgoing::memory_cache::MemoryCachePort;
use moka::{future::Cache, policy::EvictionPolicy};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct MokaMemoryCacheConfig {
    pub max_entries: u64,
}

/// LRU-bounded tile cache holding the most recently served encoded tiles.
#[derive(Clone)]
pub struct MokaMemoryCacheAdapter {
    cache: Cache<TileAddress, Arc<Vec<u8>>>,
}

impl MokaMemoryCacheAdapter {
    pub fn new(config: MokaMemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .eviction_policy(EvictionPolicy::lru())
            .build();
        Self { cache }
    }

    /// Applies pending evictions so `entry_count` is exact.
    #[cfg(test)]
    async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }
}

#[async_trait::async_trait]
impl MemoryCachePort for MokaMemoryCacheAdapter {
    async fn get(&self, address: &TileAddress) -> Option<Vec<u8>> {
        self.cache
            .get(address)
            .await
            .map(|bytes| bytes.as_ref().clone())
    }

    async fn insert(&self, address: TileAddress, data: Vec<u8>) {
        self.cache.insert(address, Arc::new(data)).await;
    }

    async fn invalidate_product(&self, product: &ProductId) {
        let doomed: Vec<Arc<TileAddress>> = self
            .cache
            .iter()
            .filter(|(address, _)| &address.product == product)
            .map(|(address, _)| address)
            .collect();

        for address in &doomed {
            self.cache.invalidate(address.as_ref()).await;
        }
        debug!("Evicted {} memory entries for {}", doomed.len(), product);
    }

    fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn address(product: &str, col: u32) -> TileAddress {
        TileAddress::new(ProductId::new(product).unwrap(), 1, 0, col)
    }

    fn adapter(max_entries: u64) -> MokaMemoryCacheAdapter {
        MokaMemoryCacheAdapter::new(MokaMemoryCacheConfig { max_entries })
    }

    #[tokio::test]
    async fn stores_and_returns_bytes() {
        let cache = adapter(10);
        cache.insert(address("wac_global", 0), vec![1, 2, 3]).await;

        assert_eq!(cache.get(&address("wac_global", 0)).await, Some(vec![1, 2, 3]));
        assert_eq!(cache.get(&address("wac_global", 1)).await, None);
    }

    #[tokio::test]
    async fn invalidating_a_product_keeps_others() {
        let cache = adapter(10);
        cache.insert(address("wac_global", 0), vec![1]).await;
        cache.insert(address("wac_global", 1), vec![2]).await;
        cache.insert(address("lola_shade", 0), vec![3]).await;

        cache.invalidate_product(&ProductId::new("wac_global").unwrap()).await;

        assert!(cache.get(&address("wac_global", 0)).await.is_none());
        assert!(cache.get(&address("wac_global", 1)).await.is_none());
        assert_eq!(cache.get(&address("lola_shade", 0)).await, Some(vec![3]));
    }

    #[tokio::test]
    async fn capacity_bounds_entry_count() {
        let cache = adapter(2);
        for col in 0..5 {
            cache.insert(address("wac_color", col), vec![0; 4]).await;
        }
        cache.sync().await;

        assert!(cache.entry_count() <= 2);
    }
}
