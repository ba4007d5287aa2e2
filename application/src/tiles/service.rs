use std::sync::Arc;
use tracing::{debug, instrument};

use domain::product::TileFormat;

use crate::{
    error::AppResult, ports::incoming::tiles::TileQueryUseCase,
    products::registry::ProductRegistry,
};

use super::{
    gateway::{CacheLevel, TileGateway},
    resolver,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSource {
    MemoryCache,
    DiskCache,
    Upstream,
    Placeholder,
}

impl TileSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MemoryCache => "memory",
            Self::DiskCache => "disk",
            Self::Upstream => "upstream",
            Self::Placeholder => "placeholder",
        }
    }

    #[must_use]
    pub fn is_placeholder(self) -> bool {
        self == Self::Placeholder
    }
}

impl From<CacheLevel> for TileSource {
    fn from(level: CacheLevel) -> Self {
        match level {
            CacheLevel::Memory => Self::MemoryCache,
            CacheLevel::Disk => Self::DiskCache,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TileResponse {
    pub bytes: Vec<u8>,
    pub format: TileFormat,
    pub source: TileSource,
}

/// Serves tiles from memory, then disk, then upstream, falling back to a rendered placeholder.
pub struct TileService {
    registry: Arc<ProductRegistry>,
    gateway: TileGateway,
}

impl TileService {
    pub fn new(registry: Arc<ProductRegistry>, gateway: TileGateway) -> Arc<Self> {
        Arc::new(Self { registry, gateway })
    }

    #[instrument(skip(self))]
    pub async fn get_tile(
        &self,
        product_id: &str,
        zoom: u8,
        row: u32,
        col: u32,
    ) -> AppResult<TileResponse> {
        let (product, address) = self.registry.resolve_address(product_id, zoom, row, col)?;
        let key = resolver::cache_key(&address, product.format);

        if let Some(cached) = self.gateway.lookup(&address, &key).await? {
            debug!("Serving tile {} from {:?} cache", address, cached.level);
            return Ok(TileResponse {
                bytes: cached.bytes,
                format: product.format,
                source: cached.level.into(),
            });
        }

        if let Some(bytes) = self.gateway.fetch_and_store(product, &address, &key).await? {
            return Ok(TileResponse {
                bytes,
                format: product.format,
                source: TileSource::Upstream,
            });
        }

        debug!("Rendering placeholder for tile {}", address);
        let bytes = self.gateway.placeholder(&address, product.format).await?;
        Ok(TileResponse {
            bytes,
            format: product.format,
            source: TileSource::Placeholder,
        })
    }
}

#[async_trait::async_trait]
impl TileQueryUseCase for TileService {
    async fn get_tile(
        &self,
        product: &str,
        zoom: u8,
        row: u32,
        col: u32,
    ) -> AppResult<TileResponse> {
        self.get_tile(product, zoom, row, col).await
    }
}
