use std::sync::Arc;

use lunar_tiles_application::{
    infrastructure_config::Config,
    ports::incoming::{
        cache::CacheMaintenanceUseCase, catalog::ProductCatalogUseCase,
        prefetch::PrefetchUseCase, tiles::TileQueryUseCase,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tile_query_service: Arc<dyn TileQueryUseCase + Send + Sync>,
    pub catalog_service: Arc<dyn ProductCatalogUseCase + Send + Sync>,
    pub prefetch_service: Arc<dyn PrefetchUseCase + Send + Sync>,
    pub cache_service: Arc<dyn CacheMaintenanceUseCase + Send + Sync>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        tile_query_service: Arc<dyn TileQueryUseCase + Send + Sync>,
        catalog_service: Arc<dyn ProductCatalogUseCase + Send + Sync>,
        prefetch_service: Arc<dyn PrefetchUseCase + Send + Sync>,
        cache_service: Arc<dyn CacheMaintenanceUseCase + Send + Sync>,
    ) -> Self {
        Self {
            config,
            tile_query_service,
            catalog_service,
            prefetch_service,
            cache_service,
        }
    }
}
