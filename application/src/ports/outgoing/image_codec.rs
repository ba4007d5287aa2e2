use crate::error::AppResult;
use domain::{product::TileFormat, tile::DecodedTile, tile::TileAddress};
use std::sync::Arc;

/// CPU-bound image work. Callers on the async runtime go through `CodecOffloadPort`.
pub trait TileCodecPort: Send + Sync {
    fn decode(&self, data: &[u8]) -> AppResult<DecodedTile>;

    fn encode(&self, tile: &DecodedTile, format: TileFormat) -> AppResult<Vec<u8>>;

    fn render_placeholder(&self, address: &TileAddress, format: TileFormat) -> AppResult<Vec<u8>>;
}

pub type DynTileCodecPort = Arc<dyn TileCodecPort>;
