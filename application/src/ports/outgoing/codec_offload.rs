use crate::error::AppResult;
use domain::{product::TileFormat, tile::DecodedTile, tile::TileAddress};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type CodecFuture<T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'static>>;

/// Runs codec work off the async executor with a deadline.
///
/// A missed deadline surfaces as `AppError::CodecError`, a crashed worker as `AppError::TaskError`.
pub trait CodecOffloadPort: Send + Sync {
    fn decode(&self, data: Vec<u8>) -> CodecFuture<DecodedTile>;

    fn encode(&self, tile: DecodedTile, format: TileFormat) -> CodecFuture<Vec<u8>>;

    fn render_placeholder(&self, address: TileAddress, format: TileFormat) -> CodecFuture<Vec<u8>>;
}

pub type DynCodecOffloadPort = Arc<dyn CodecOffloadPort>;
