use std::sync::Arc;
use tracing::{info, instrument};

use domain::product::ProductId;

use crate::{
    error::AppResult, ports::incoming::cache::CacheMaintenanceUseCase,
    products::registry::ProductRegistry, tiles::gateway::TileGateway,
};

#[derive(Debug, Clone)]
pub struct ClearedCache {
    pub product_id: ProductId,
    pub product_name: String,
    pub tiles_deleted: u64,
}

pub struct CacheService {
    registry: Arc<ProductRegistry>,
    gateway: TileGateway,
}

impl CacheService {
    pub fn new(registry: Arc<ProductRegistry>, gateway: TileGateway) -> Arc<Self> {
        Arc::new(Self { registry, gateway })
    }

    #[instrument(skip(self))]
    pub async fn clear_product_cache(&self, product_id: &str) -> AppResult<ClearedCache> {
        let product = self.registry.lookup(product_id)?;
        let tiles_deleted = self.gateway.clear_product(product).await?;

        info!(tiles_deleted, "Cleared tile cache for {}", product.id);

        Ok(ClearedCache {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            tiles_deleted,
        })
    }
}

#[async_trait::async_trait]
impl CacheMaintenanceUseCase for CacheService {
    async fn clear_product_cache(&self, product: &str) -> AppResult<ClearedCache> {
        self.clear_product_cache(product).await
    }
}
