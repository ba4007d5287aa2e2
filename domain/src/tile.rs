use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};
use crate::product::{ProductId, TileFormat};

/// A single tile within a product's WMTS grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileAddress {
    pub product: ProductId,
    pub zoom: u8,
    pub row: u32,
    pub col: u32,
}

impl TileAddress {
    #[must_use]
    pub fn new(product: ProductId, zoom: u8, row: u32, col: u32) -> Self {
        Self {
            product,
            zoom,
            row,
            col,
        }
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} z{} [{},{}]", self.product, self.zoom, self.row, self.col)
    }
}

/// Location of a tile in the persistent store: `<product>/tile_<zoom>_<row>_<col>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileKey {
    product: ProductId,
    file_name: String,
}

impl TileKey {
    #[must_use]
    pub fn new(address: &TileAddress, format: TileFormat) -> Self {
        Self {
            product: address.product.clone(),
            file_name: format!(
                "tile_{}_{}_{}.{}",
                address.zoom,
                address.row,
                address.col,
                format.extension()
            ),
        }
    }

    #[must_use]
    pub fn product(&self) -> &ProductId {
        &self.product
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.product, self.file_name)
    }
}

/// Raw RGBA8 pixels of a decoded tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTile {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl DecodedTile {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> DomainResult<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(DomainError::CodecError(format!(
                "{width}x{height} RGBA tile needs {expected} bytes, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.rgba.chunks_exact(4).all(|px| px.get(3) == Some(&u8::MAX))
    }
}

/// Aggregate of the tiles persisted for one product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub tile_count: u64,
    pub total_bytes: u64,
}

impl CacheStats {
    pub fn record(&mut self, bytes: u64) {
        self.tile_count += 1;
        self.total_bytes += bytes;
    }

    /// Size in mebibytes rounded to two decimals.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size_mb(&self) -> f64 {
        let mb = self.total_bytes as f64 / (1024.0 * 1024.0);
        (mb * 100.0).round() / 100.0
    }
}
