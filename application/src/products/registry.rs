use std::collections::HashMap;

use domain::{
    product::{EndpointTemplate, Product, ProductId},
    tile::TileAddress,
};
use url::Url;

use crate::{
    error::{AppError, AppResult},
    infrastructure_config::ProductConfig,
};

/// Immutable catalog of the products served by this instance, in configuration order.
#[derive(Debug, Clone)]
pub struct ProductRegistry {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl ProductRegistry {
    pub fn new(products: Vec<Product>) -> AppResult<Self> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index
                .insert(product.id.as_str().to_string(), position)
                .is_some()
            {
                return Err(AppError::ConfigError {
                    message: format!("Duplicate product id '{}'", product.id),
                });
            }
        }
        Ok(Self { products, index })
    }

    pub fn from_configs(configs: &[ProductConfig]) -> AppResult<Self> {
        let products = configs
            .iter()
            .map(product_from_config)
            .collect::<AppResult<Vec<_>>>()?;
        Self::new(products)
    }

    pub fn lookup(&self, id: &str) -> AppResult<&Product> {
        self.index
            .get(id)
            .and_then(|position| self.products.get(*position))
            .ok_or_else(|| AppError::ProductNotFound {
                product: id.to_string(),
            })
    }

    #[must_use]
    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn ensure_zoom(product: &Product, zoom: u8) -> AppResult<()> {
        if product.supports_zoom(zoom) {
            Ok(())
        } else {
            Err(AppError::InvalidZoom {
                product: product.id.to_string(),
                zoom: i64::from(zoom),
                max_zoom: product.max_zoom,
            })
        }
    }

    /// Looks up the product and checks the zoom level, yielding a routable address.
    pub fn resolve_address(
        &self,
        id: &str,
        zoom: u8,
        row: u32,
        col: u32,
    ) -> AppResult<(&Product, TileAddress)> {
        let product = self.lookup(id)?;
        Self::ensure_zoom(product, zoom)?;
        Ok((product, TileAddress::new(product.id.clone(), zoom, row, col)))
    }
}

fn product_from_config(config: &ProductConfig) -> AppResult<Product> {
    let id = ProductId::new(config.id.as_str()).map_err(|e| AppError::ConfigError {
        message: e.to_string(),
    })?;
    let endpoint =
        EndpointTemplate::new(config.endpoint.as_str()).map_err(|e| AppError::ConfigError {
            message: format!("product '{id}': {e}"),
        })?;

    let sample = endpoint.render(0, 0, 0);
    let url = Url::parse(&sample).map_err(|e| AppError::ConfigError {
        message: format!("product '{id}': endpoint '{sample}' is not a valid URL: {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::ConfigError {
            message: format!("product '{id}': endpoint must use http or https"),
        });
    }

    Ok(Product {
        id,
        name: config.name.clone(),
        description: config.description.clone(),
        layer: config.layer.clone(),
        endpoint,
        max_zoom: config.max_zoom,
        format: config.format,
    })
}
