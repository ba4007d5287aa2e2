use std::time::Duration;

use crate::infrastructure_config::Config;

/// Tile pipeline settings consumed by the application services and codec adapters.
#[derive(Debug, Clone)]
pub struct TileSettings {
    pub tile_size: u32,
    pub codec_timeout: Duration,
}

impl From<&Config> for TileSettings {
    fn from(config: &Config) -> Self {
        Self {
            tile_size: config.tiles.tile_size,
            codec_timeout: Duration::from_millis(config.tiles.codec_timeout_ms),
        }
    }
}
