use crate::{cache::service::ClearedCache, error::AppResult};

#[async_trait::async_trait]
pub trait CacheMaintenanceUseCase: Send + Sync {
    async fn clear_product_cache(&self, product: &str) -> AppResult<ClearedCache>;
}
