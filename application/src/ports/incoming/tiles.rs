use crate::{error::AppResult, tiles::service::TileResponse};

#[async_trait::async_trait]
pub trait TileQueryUseCase: Send + Sync {
    async fn get_tile(&self, product: &str, zoom: u8, row: u32, col: u32)
    -> AppResult<TileResponse>;
}
