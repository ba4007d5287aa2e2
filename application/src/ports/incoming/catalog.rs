use domain::product::Product;

use crate::{catalog::service::ProductSummary, error::AppResult};

#[async_trait::async_trait]
pub trait ProductCatalogUseCase: Send + Sync {
    async fn list_products(&self) -> AppResult<Vec<ProductSummary>>;

    async fn product_info(&self, product: &str) -> AppResult<ProductSummary>;

    /// Registry lookup only; no cache statistics are gathered.
    fn find_product(&self, product: &str) -> AppResult<Product>;

    fn memory_cache_entries(&self) -> u64;
}
