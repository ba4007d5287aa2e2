#![allow(dead_code, clippy::unwrap_used)]

use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use domain::{fetch::FetchOutcome, product::TileFormat};
use image::{ImageFormat, RgbImage};
use lunar_tiles_adapters::{
    incoming::http_axum::routes::build_application_router,
    outgoing::{
        fs_tokio::tile_store_fs::FsTileStoreAdapter,
        image_rs::tile_codec_image::{ImageTileCodecAdapter, ImageTileCodecConfig},
        moka_memory::memory_cache_moka::{MokaMemoryCacheAdapter, MokaMemoryCacheConfig},
        tokio_spawn::{TokioTaskSpawnAdapter, codec_offload_tokio::TokioCodecOffloadAdapter},
    },
    shared::app_state::AppState,
};
use lunar_tiles_application::{
    cache::service::CacheService,
    catalog::service::CatalogService,
    infrastructure_config::{Config, ProductConfig},
    ports::outgoing::upstream::UpstreamTilePort,
    prefetch::service::PrefetchService,
    products::registry::ProductRegistry,
    tiles::{fetcher::TileFetcher, gateway::TileGateway, service::TileService},
};
use tempfile::TempDir;

pub const UPSTREAM: &str = "https://upstream.test";

/// Upstream double keyed by URL; anything unscripted is a 404.
#[derive(Default)]
pub struct ScriptedUpstream {
    responses: Mutex<HashMap<String, FetchOutcome>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedUpstream {
    pub fn respond(&self, url: &str, outcome: FetchOutcome) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), outcome);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl UpstreamTilePort for ScriptedUpstream {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or(FetchOutcome::NotAvailable)
    }
}

pub fn encoded_tile(format: ImageFormat) -> Vec<u8> {
    let image = RgbImage::from_fn(32, 32, |x, y| image::Rgb([x as u8 * 8, y as u8 * 8, 90]));
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format).unwrap();
    out.into_inner()
}

pub fn test_products() -> Vec<ProductConfig> {
    vec![
        ProductConfig {
            id: "moon_jpg".to_string(),
            name: "Moon JPEG".to_string(),
            description: "Test mosaic".to_string(),
            layer: "MOON_JPG".to_string(),
            endpoint: format!("{UPSTREAM}/moon_jpg/{{zoom}}/{{row}}/{{col}}"),
            max_zoom: 3,
            format: TileFormat::Jpeg,
        },
        ProductConfig {
            id: "moon_png".to_string(),
            name: "Moon PNG".to_string(),
            description: "Test relief".to_string(),
            layer: "MOON_PNG".to_string(),
            endpoint: format!("{UPSTREAM}/moon_png/{{zoom}}/{{row}}/{{col}}"),
            max_zoom: 2,
            format: TileFormat::Png,
        },
    ]
}

pub struct TestApp {
    pub router: Router,
    pub upstream: Arc<ScriptedUpstream>,
    pub memory: Arc<MokaMemoryCacheAdapter>,
    pub tiles_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let tiles_dir = tempfile::tempdir().unwrap();

        let mut config = Config::default();
        config.tiles.tiles_dir = tiles_dir.path().to_path_buf();
        config.tiles.tile_size = 64;
        config.products = test_products();
        config.validate().unwrap();

        let registry = Arc::new(ProductRegistry::from_configs(&config.products).unwrap());
        let upstream = Arc::new(ScriptedUpstream::default());
        let memory = Arc::new(MokaMemoryCacheAdapter::new(MokaMemoryCacheConfig {
            max_entries: config.tiles.memory_cache_capacity,
        }));
        let codec = Arc::new(TokioCodecOffloadAdapter::new(
            Arc::new(ImageTileCodecAdapter::new(ImageTileCodecConfig {
                tile_size: config.tiles.tile_size,
            })),
            Duration::from_secs(10),
        ));
        let store = Arc::new(FsTileStoreAdapter::new(tiles_dir.path()));

        let fetcher = TileFetcher::new(upstream.clone(), codec.clone());
        let gateway = TileGateway::new(store, memory.clone(), fetcher, codec);

        let state = AppState::new(
            Arc::new(config),
            TileService::new(Arc::clone(&registry), gateway.clone()),
            CatalogService::new(Arc::clone(&registry), gateway.clone()),
            PrefetchService::new(
                Arc::clone(&registry),
                gateway.clone(),
                Arc::new(TokioTaskSpawnAdapter::new()),
            ),
            CacheService::new(registry, gateway),
        );

        Self {
            router: build_application_router().with_state(state),
            upstream,
            memory,
            tiles_dir,
        }
    }

    pub fn tile_path(&self, product: &str, zoom: u8, row: u32, col: u32, ext: &str) -> PathBuf {
        self.tiles_dir
            .path()
            .join(product)
            .join(format!("tile_{zoom}_{row}_{col}.{ext}"))
    }

    pub fn script(&self, product: &str, zoom: u8, row: u32, col: u32, ext: &str, body: Vec<u8>) {
        self.upstream.respond(
            &format!("{UPSTREAM}/{product}/{zoom}/{row}/{col}.{ext}"),
            FetchOutcome::Success(body),
        );
    }
}
