use std::sync::Arc;
use std::time::Duration;
use tokio::{task::spawn_blocking, time::timeout};

use domain::{
    product::TileFormat,
    tile::{DecodedTile, TileAddress},
};
use lunar_tiles_application::{
    error::{AppError, AppResult},
    ports::outgoing::{
        codec_offload::{CodecFuture, CodecOffloadPort},
        image_codec::DynTileCodecPort,
    },
};

/// Runs the blocking codec on tokio's blocking pool under a deadline.
pub struct TokioCodecOffloadAdapter {
    codec_port: DynTileCodecPort,
    deadline: Duration,
}

impl TokioCodecOffloadAdapter {
    pub fn new(codec_port: DynTileCodecPort, deadline: Duration) -> Self {
        Self {
            codec_port,
            deadline,
        }
    }
}

async fn run_blocking<T, F>(operation: &'static str, deadline: Duration, work: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    let task = spawn_blocking(work);

    timeout(deadline, task)
        .await
        .map_err(|_| AppError::CodecError {
            message: format!("Tile {operation} timed out after {}ms", deadline.as_millis()),
        })?
        .map_err(|e| AppError::TaskError {
            message: format!("Tile {operation} task failed: {e}"),
        })?
}

impl CodecOffloadPort for TokioCodecOffloadAdapter {
    fn decode(&self, data: Vec<u8>) -> CodecFuture<DecodedTile> {
        let codec = Arc::clone(&self.codec_port);
        Box::pin(run_blocking("decode", self.deadline, move || {
            codec.decode(&data)
        }))
    }

    fn encode(&self, tile: DecodedTile, format: TileFormat) -> CodecFuture<Vec<u8>> {
        let codec = Arc::clone(&self.codec_port);
        Box::pin(run_blocking("encode", self.deadline, move || {
            codec.encode(&tile, format)
        }))
    }

    fn render_placeholder(&self, address: TileAddress, format: TileFormat) -> CodecFuture<Vec<u8>> {
        let codec = Arc::clone(&self.codec_port);
        Box::pin(run_blocking("placeholder", self.deadline, move || {
            codec.render_placeholder(&address, format)
        }))
    }
}
