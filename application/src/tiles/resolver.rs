use domain::{
    product::{Product, TileFormat},
    tile::{TileAddress, TileKey},
};

#[must_use]
pub fn cache_key(address: &TileAddress, format: TileFormat) -> TileKey {
    TileKey::new(address, format)
}

/// WMTS URL for `address`: the product endpoint with coordinates filled in, plus the format extension.
#[must_use]
pub fn upstream_url(address: &TileAddress, product: &Product) -> String {
    format!(
        "{}.{}",
        product
            .endpoint
            .render(address.zoom, address.row, address.col),
        product.format.extension()
    )
}
