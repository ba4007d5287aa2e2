use std::sync::Arc;

use domain::{product::Product, tile::CacheStats};

use crate::{
    error::AppResult, ports::incoming::catalog::ProductCatalogUseCase,
    products::registry::ProductRegistry, tiles::gateway::TileGateway,
};

/// A product together with what is currently stored for it.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub product: Product,
    pub stats: CacheStats,
}

pub struct CatalogService {
    registry: Arc<ProductRegistry>,
    gateway: TileGateway,
}

impl CatalogService {
    pub fn new(registry: Arc<ProductRegistry>, gateway: TileGateway) -> Arc<Self> {
        Arc::new(Self { registry, gateway })
    }

    async fn summarize(&self, product: &Product) -> AppResult<ProductSummary> {
        let stats = self.gateway.stats(product).await?;
        Ok(ProductSummary {
            product: product.clone(),
            stats,
        })
    }
}

#[async_trait::async_trait]
impl ProductCatalogUseCase for CatalogService {
    async fn list_products(&self) -> AppResult<Vec<ProductSummary>> {
        let mut summaries = Vec::with_capacity(self.registry.len());
        for product in self.registry.list_all() {
            summaries.push(self.summarize(product).await?);
        }
        Ok(summaries)
    }

    async fn product_info(&self, product: &str) -> AppResult<ProductSummary> {
        let product = self.registry.lookup(product)?;
        self.summarize(product).await
    }

    fn find_product(&self, product: &str) -> AppResult<Product> {
        self.registry.lookup(product).cloned()
    }

    fn memory_cache_entries(&self) -> u64 {
        self.gateway.memory_entry_count()
    }
}
