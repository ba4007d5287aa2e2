#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::sync::Notify;

use domain::{
    fetch::FetchOutcome,
    product::{Product, ProductId, TileFormat},
    tile::{CacheStats, DecodedTile, TileAddress, TileKey},
};

use crate::{
    error::{AppError, AppResult},
    infrastructure_config::ProductConfig,
    ports::outgoing::{
        codec_offload::{CodecFuture, CodecOffloadPort, DynCodecOffloadPort},
        memory_cache::{DynMemoryCachePort, MemoryCachePort},
        task_spawn::{BackgroundTask, TaskSpawnPort},
        tile_store::{DynTileStorePort, TileStorePort},
        upstream::{DynUpstreamTilePort, UpstreamTilePort},
    },
    products::registry::ProductRegistry,
    tiles::{fetcher::TileFetcher, gateway::TileGateway},
};

/// Upstream body the fake codec accepts as an image.
pub const VALID_BODY: &[u8] = b"IMG:moon";

/// Pauses a store write after the bytes land until the test releases it.
#[derive(Default)]
pub struct WriteGate {
    pub written: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct InMemoryTileStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
    write_gate: Mutex<Option<Arc<WriteGate>>>,
}

impl InMemoryTileStore {
    pub fn hold_writes(&self) -> Arc<WriteGate> {
        let gate = Arc::new(WriteGate::default());
        *self.write_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn put(&self, key: &TileKey, data: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
    }

    pub fn get(&self, key: &TileKey) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(&key.to_string()).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn product_files(&self, product: &ProductId, format: TileFormat) -> Vec<(String, usize)> {
        let prefix = format!("{product}/");
        let suffix = format!(".{}", format.extension());
        self.files
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix) && k.ends_with(&suffix))
            .map(|(k, v)| (k.clone(), v.len()))
            .collect()
    }
}

#[async_trait::async_trait]
impl TileStorePort for InMemoryTileStore {
    async fn exists(&self, key: &TileKey) -> AppResult<bool> {
        Ok(self.get(key).is_some())
    }

    async fn read(&self, key: &TileKey) -> AppResult<Option<Vec<u8>>> {
        Ok(self.get(key))
    }

    async fn write(&self, key: &TileKey, data: &[u8]) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::StorageError {
                message: format!("disk full writing {key}"),
            });
        }
        self.put(key, data);
        let gate = self.write_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.written.notify_one();
            gate.release.notified().await;
        }
        Ok(())
    }

    async fn clear_product(&self, product: &ProductId, format: TileFormat) -> AppResult<u64> {
        let doomed = self.product_files(product, format);
        let mut files = self.files.lock().unwrap();
        for (key, _) in &doomed {
            files.remove(key);
        }
        Ok(doomed.len() as u64)
    }

    async fn stats(&self, product: &ProductId, format: TileFormat) -> AppResult<CacheStats> {
        let mut stats = CacheStats::default();
        for (_, size) in self.product_files(product, format) {
            stats.record(size as u64);
        }
        Ok(stats)
    }

    async fn prepare_product(&self, _product: &ProductId) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMemoryCache {
    entries: Mutex<HashMap<TileAddress, Vec<u8>>>,
}

impl InMemoryMemoryCache {
    pub fn contains(&self, address: &TileAddress) -> bool {
        self.entries.lock().unwrap().contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl MemoryCachePort for InMemoryMemoryCache {
    async fn get(&self, address: &TileAddress) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(address).cloned()
    }

    async fn insert(&self, address: TileAddress, data: Vec<u8>) {
        self.entries.lock().unwrap().insert(address, data);
    }

    async fn invalidate_product(&self, product: &ProductId) {
        self.entries
            .lock()
            .unwrap()
            .retain(|address, _| &address.product != product);
    }

    fn entry_count(&self) -> u64 {
        self.len() as u64
    }
}

pub struct ScriptedUpstream {
    fallback: FetchOutcome,
    responses: Mutex<HashMap<String, FetchOutcome>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedUpstream {
    pub fn new(fallback: FetchOutcome) -> Self {
        Self {
            fallback,
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(&self, url: &str, outcome: FetchOutcome) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), outcome);
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl UpstreamTilePort for ScriptedUpstream {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Accepts bodies starting with `IMG:` as a 1x1 tile and encodes to a readable marker.
#[derive(Default)]
pub struct FakeCodec {
    fail_encode: AtomicBool,
}

impl FakeCodec {
    pub fn fail_encoding(&self) {
        self.fail_encode.store(true, Ordering::SeqCst);
    }
}

impl CodecOffloadPort for FakeCodec {
    fn decode(&self, data: Vec<u8>) -> CodecFuture<DecodedTile> {
        Box::pin(async move {
            if data.starts_with(b"IMG:") {
                Ok(DecodedTile::new(1, 1, vec![10, 20, 30, 255])?)
            } else {
                Err(AppError::CodecError {
                    message: "not an image".to_string(),
                })
            }
        })
    }

    fn encode(&self, tile: DecodedTile, format: TileFormat) -> CodecFuture<Vec<u8>> {
        let fail = self.fail_encode.load(Ordering::SeqCst);
        Box::pin(async move {
            if fail {
                return Err(AppError::CodecError {
                    message: "encoder exploded".to_string(),
                });
            }
            Ok(format!("{}:{}", format.extension(), tile.rgba().len()).into_bytes())
        })
    }

    fn render_placeholder(&self, address: TileAddress, format: TileFormat) -> CodecFuture<Vec<u8>> {
        Box::pin(async move { Ok(format!("placeholder:{address}:{format}").into_bytes()) })
    }
}

/// Holds spawned tasks until the test drives them.
#[derive(Default)]
pub struct CollectingSpawner {
    tasks: Mutex<Vec<BackgroundTask>>,
}

impl CollectingSpawner {
    pub fn pending(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub async fn run_all(&self) {
        let tasks: Vec<BackgroundTask> = std::mem::take(&mut *self.tasks.lock().unwrap());
        for task in tasks {
            task.await;
        }
    }
}

impl TaskSpawnPort for CollectingSpawner {
    fn spawn(&self, _label: &'static str, task: BackgroundTask) {
        self.tasks.lock().unwrap().push(task);
    }
}

pub fn test_products() -> Vec<ProductConfig> {
    vec![
        ProductConfig {
            id: "moon_jpg".to_string(),
            name: "Moon JPEG".to_string(),
            description: "JPEG test layer".to_string(),
            layer: "Moon_Jpg".to_string(),
            endpoint: "https://upstream.test/moon_jpg/{zoom}/{row}/{col}".to_string(),
            max_zoom: 3,
            format: TileFormat::Jpeg,
        },
        ProductConfig {
            id: "moon_png".to_string(),
            name: "Moon PNG".to_string(),
            description: "PNG test layer".to_string(),
            layer: "Moon_Png".to_string(),
            endpoint: "https://upstream.test/moon_png/{zoom}/{row}/{col}".to_string(),
            max_zoom: 2,
            format: TileFormat::Png,
        },
    ]
}

pub struct Harness {
    pub registry: Arc<ProductRegistry>,
    pub store: Arc<InMemoryTileStore>,
    pub memory: Arc<InMemoryMemoryCache>,
    pub upstream: Arc<ScriptedUpstream>,
    pub codec: Arc<FakeCodec>,
    pub gateway: TileGateway,
}

impl Harness {
    pub fn new(fallback: FetchOutcome) -> Self {
        let registry = Arc::new(ProductRegistry::from_configs(&test_products()).unwrap());
        let store = Arc::new(InMemoryTileStore::default());
        let memory = Arc::new(InMemoryMemoryCache::default());
        let upstream = Arc::new(ScriptedUpstream::new(fallback));
        let codec = Arc::new(FakeCodec::default());

        let fetcher = TileFetcher::new(
            Arc::clone(&upstream) as DynUpstreamTilePort,
            Arc::clone(&codec) as DynCodecOffloadPort,
        );
        let gateway = TileGateway::new(
            Arc::clone(&store) as DynTileStorePort,
            Arc::clone(&memory) as DynMemoryCachePort,
            fetcher,
            Arc::clone(&codec) as DynCodecOffloadPort,
        );

        Self {
            registry,
            store,
            memory,
            upstream,
            codec,
            gateway,
        }
    }

    pub fn fetcher(&self) -> TileFetcher {
        TileFetcher::new(
            Arc::clone(&self.upstream) as DynUpstreamTilePort,
            Arc::clone(&self.codec) as DynCodecOffloadPort,
        )
    }

    pub fn address(&self, product: &str, zoom: u8, row: u32, col: u32) -> (Product, TileAddress) {
        let product = self.registry.lookup(product).unwrap().clone();
        let address = TileAddress::new(product.id.clone(), zoom, row, col);
        (product, address)
    }
}
