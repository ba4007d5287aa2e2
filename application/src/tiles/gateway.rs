use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use domain::{
    product::{Product, ProductId, TileFormat},
    tile::{CacheStats, TileAddress, TileKey},
};
use tracing::{debug, warn};

use crate::{
    error::AppResult,
    ports::outgoing::{
        codec_offload::DynCodecOffloadPort, memory_cache::DynMemoryCachePort,
        tile_store::DynTileStorePort,
    },
};

use super::fetcher::{FetchedTile, TileFetcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLevel {
    Memory,
    Disk,
}

#[derive(Debug)]
pub struct CachedTile {
    pub bytes: Vec<u8>,
    pub level: CacheLevel,
}

/// Per-product counter bumped on every clear. A disk read or upstream fill that started
/// before a clear must not repopulate the memory cache after it.
#[derive(Debug, Default)]
struct ClearEpochs {
    epochs: Mutex<HashMap<ProductId, u64>>,
}

impl ClearEpochs {
    fn current(&self, product: &ProductId) -> u64 {
        let epochs = self.epochs.lock().unwrap_or_else(PoisonError::into_inner);
        epochs.get(product).copied().unwrap_or_default()
    }

    fn advance(&self, product: &ProductId) {
        let mut epochs = self.epochs.lock().unwrap_or_else(PoisonError::into_inner);
        *epochs.entry(product.clone()).or_default() += 1;
    }
}

/// Two-level tile cache (memory over disk) plus the upstream fill path.
#[derive(Clone)]
pub struct TileGateway {
    store: DynTileStorePort,
    memory: DynMemoryCachePort,
    fetcher: TileFetcher,
    codec: DynCodecOffloadPort,
    clear_epochs: Arc<ClearEpochs>,
}

impl TileGateway {
    pub fn new(
        store: DynTileStorePort,
        memory: DynMemoryCachePort,
        fetcher: TileFetcher,
        codec: DynCodecOffloadPort,
    ) -> Self {
        Self {
            store,
            memory,
            fetcher,
            codec,
            clear_epochs: Arc::new(ClearEpochs::default()),
        }
    }

    pub async fn lookup(
        &self,
        address: &TileAddress,
        key: &TileKey,
    ) -> AppResult<Option<CachedTile>> {
        if let Some(bytes) = self.memory.get(address).await {
            return Ok(Some(CachedTile {
                bytes,
                level: CacheLevel::Memory,
            }));
        }

        let epoch = self.clear_epochs.current(&address.product);
        let Some(bytes) = self.store.read(key).await? else {
            return Ok(None);
        };
        self.remember(address, epoch, &bytes).await;

        Ok(Some(CachedTile {
            bytes,
            level: CacheLevel::Disk,
        }))
    }

    pub async fn is_persisted(&self, key: &TileKey) -> AppResult<bool> {
        self.store.exists(key).await
    }

    /// Fetches, re-encodes and persists a tile, then warms the memory cache.
    /// `Ok(None)` means no usable upstream image; storage failures are errors.
    pub async fn fetch_and_store(
        &self,
        product: &Product,
        address: &TileAddress,
        key: &TileKey,
    ) -> AppResult<Option<Vec<u8>>> {
        let epoch = self.clear_epochs.current(&address.product);
        let Some(bytes) = self.fetch_and_persist(product, address, key).await? else {
            return Ok(None);
        };
        self.remember(address, epoch, &bytes).await;
        Ok(Some(bytes))
    }

    /// Inserts into memory unless the product was cleared since `epoch` was taken.
    async fn remember(&self, address: &TileAddress, epoch: u64, bytes: &[u8]) {
        if self.clear_epochs.current(&address.product) == epoch {
            self.memory.insert(address.clone(), bytes.to_vec()).await;
        } else {
            debug!("Cache for {} cleared while loading {}", address.product, address);
        }
    }

    /// Same as [`Self::fetch_and_store`] without touching the memory cache.
    pub async fn fetch_and_persist(
        &self,
        product: &Product,
        address: &TileAddress,
        key: &TileKey,
    ) -> AppResult<Option<Vec<u8>>> {
        let tile = match self.fetcher.fetch(product, address).await {
            FetchedTile::Fetched(tile) => tile,
            FetchedTile::Unavailable(_) => return Ok(None),
        };

        let bytes = match self.codec.encode(tile, product.format).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Re-encoding tile {} as {} failed", address, product.format);
                return Ok(None);
            }
        };

        self.store.write(key, &bytes).await?;
        debug!("Stored tile {} ({} bytes)", key, bytes.len());
        Ok(Some(bytes))
    }

    pub async fn placeholder(&self, address: &TileAddress, format: TileFormat) -> AppResult<Vec<u8>> {
        self.codec.render_placeholder(address.clone(), format).await
    }

    /// Memory is purged on both sides of the disk delete so no stale entry survives.
    pub async fn clear_product(&self, product: &Product) -> AppResult<u64> {
        self.clear_epochs.advance(&product.id);
        self.memory.invalidate_product(&product.id).await;
        let removed = self.store.clear_product(&product.id, product.format).await?;
        self.memory.invalidate_product(&product.id).await;
        Ok(removed)
    }

    pub async fn stats(&self, product: &Product) -> AppResult<CacheStats> {
        self.store.stats(&product.id, product.format).await
    }

    pub async fn prepare_product(&self, product: &Product) -> AppResult<()> {
        self.store.prepare_product(&product.id).await
    }

    pub fn memory_entry_count(&self) -> u64 {
        self.memory.entry_count()
    }
}
