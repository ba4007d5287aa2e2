use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use lunar_tiles_adapters::shared::app_state::AppState as AdaptersAppState;
use lunar_tiles_adapters::outgoing::{
    fs_tokio::tile_store_fs::FsTileStoreAdapter,
    http_reqwest::upstream_reqwest::{ReqwestUpstreamAdapter, ReqwestUpstreamConfig},
    image_rs::tile_codec_image::{ImageTileCodecAdapter, ImageTileCodecConfig},
    moka_memory::memory_cache_moka::{MokaMemoryCacheAdapter, MokaMemoryCacheConfig},
    tokio_spawn::{TokioTaskSpawnAdapter, codec_offload_tokio::TokioCodecOffloadAdapter},
};
use lunar_tiles_application::error::AppError;
use lunar_tiles_application::infrastructure_config::Config;
use lunar_tiles_application::ports::outgoing::{
    codec_offload::CodecOffloadPort, image_codec::TileCodecPort, memory_cache::MemoryCachePort,
    task_spawn::TaskSpawnPort, tile_store::TileStorePort, upstream::UpstreamTilePort,
};
use lunar_tiles_application::{
    cache::service::CacheService,
    catalog::service::CatalogService,
    config::TileSettings,
    prefetch::service::PrefetchService,
    products::registry::ProductRegistry,
    tiles::{fetcher::TileFetcher, gateway::TileGateway, service::TileService},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<ProductRegistry>,
    gateway: TileGateway,
    pub tile_service: Arc<TileService>,
    pub catalog_service: Arc<CatalogService>,
    pub prefetch_service: Arc<PrefetchService>,
    pub cache_service: Arc<CacheService>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let config = Arc::new(config);
        let registry = Arc::new(ProductRegistry::from_configs(&config.products)?);

        let gateway = Self::create_tile_gateway(&config)?;

        let tile_service = TileService::new(Arc::clone(&registry), gateway.clone());
        let catalog_service = CatalogService::new(Arc::clone(&registry), gateway.clone());
        let prefetch_service = Self::create_prefetch_service(&registry, &gateway);
        let cache_service = CacheService::new(Arc::clone(&registry), gateway.clone());

        let state = Self {
            config,
            registry,
            gateway,
            tile_service,
            catalog_service,
            prefetch_service,
            cache_service,
        };
        state.prepare_tile_directories().await?;
        Ok(state)
    }

    fn create_tile_gateway(config: &Config) -> Result<TileGateway, AppError> {
        let settings = TileSettings::from(config);

        let store: Arc<dyn TileStorePort> =
            Arc::new(FsTileStoreAdapter::new(config.tiles.tiles_dir.clone()));

        let memory: Arc<dyn MemoryCachePort> =
            Arc::new(MokaMemoryCacheAdapter::new(MokaMemoryCacheConfig {
                max_entries: config.tiles.memory_cache_capacity,
            }));

        let upstream: Arc<dyn UpstreamTilePort> =
            Arc::new(ReqwestUpstreamAdapter::new(&ReqwestUpstreamConfig {
                timeout: Duration::from_secs(config.upstream.timeout_secs),
                user_agent: config.upstream.user_agent.clone(),
                referer: config.upstream.referer.clone(),
            })?);

        let codec: Arc<dyn TileCodecPort> =
            Arc::new(ImageTileCodecAdapter::new(ImageTileCodecConfig {
                tile_size: settings.tile_size,
            }));
        let codec_offload: Arc<dyn CodecOffloadPort> = Arc::new(TokioCodecOffloadAdapter::new(
            codec,
            settings.codec_timeout,
        ));

        let fetcher = TileFetcher::new(upstream, Arc::clone(&codec_offload));
        Ok(TileGateway::new(store, memory, fetcher, codec_offload))
    }

    fn create_prefetch_service(
        registry: &Arc<ProductRegistry>,
        gateway: &TileGateway,
    ) -> Arc<PrefetchService> {
        let task_spawn: Arc<dyn TaskSpawnPort> = Arc::new(TokioTaskSpawnAdapter::new());
        PrefetchService::new(Arc::clone(registry), gateway.clone(), task_spawn)
    }

    async fn prepare_tile_directories(&self) -> Result<(), AppError> {
        for product in self.registry.list_all() {
            self.gateway.prepare_product(product).await?;
        }
        info!(
            "Tile cache ready at {} for {} products",
            self.config.tiles.tiles_dir.display(),
            self.registry.len()
        );
        Ok(())
    }

    pub fn to_adapters_state(&self) -> AdaptersAppState {
        let tile_service: Arc<TileService> = Arc::clone(&self.tile_service);
        let catalog_service: Arc<CatalogService> = Arc::clone(&self.catalog_service);
        let prefetch_service: Arc<PrefetchService> = Arc::clone(&self.prefetch_service);
        let cache_service: Arc<CacheService> = Arc::clone(&self.cache_service);

        AdaptersAppState::new(
            Arc::clone(&self.config),
            tile_service,
            catalog_service,
            prefetch_service,
            cache_service,
        )
    }
}
