use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};
use crate::products::registry::ProductRegistry;
use domain::product::TileFormat;

const NASA_TREK_MOON_BASE: &str = "https://trek.nasa.gov/tiles/Moon/EQ";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub tiles: TileConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingConfig,
    pub products: Vec<ProductConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileConfig {
    pub tiles_dir: PathBuf,
    pub tile_size: u32,
    pub memory_cache_capacity: u64,
    pub http_cache_control: String,
    pub codec_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub referer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub include_location: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogFormat {
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "pretty")]
    Pretty,
}

/// One upstream WMTS layer exposed by the proxy.
///
/// `endpoint` is the full upstream URL template without extension; it must contain
/// `{zoom}`, `{row}` and `{col}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub layer: String,
    pub endpoint: String,
    pub max_zoom: u8,
    pub format: TileFormat,
}

impl ProductConfig {
    fn nasa_trek(
        id: &str,
        name: &str,
        description: &str,
        layer: &str,
        max_zoom: u8,
        format: TileFormat,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            layer: layer.to_string(),
            endpoint: format!(
                "{NASA_TREK_MOON_BASE}/{layer}/1.0.0/default/default028mm/{{zoom}}/{{row}}/{{col}}"
            ),
            max_zoom,
            format,
        }
    }

    #[must_use]
    pub fn default_catalog() -> Vec<Self> {
        const WAC_MOSAIC: &str = "LRO_WAC_Mosaic_Global_303ppd";
        vec![
            Self::nasa_trek(
                "wac_global",
                "WAC Global Mosaic 100m",
                "LRO Wide Angle Camera global mosaic at 100m/pixel",
                WAC_MOSAIC,
                7,
                TileFormat::Jpeg,
            ),
            Self::nasa_trek(
                "wac_nearside",
                "WAC Nearside Mosaic",
                "WAC Nearside mosaic",
                WAC_MOSAIC,
                7,
                TileFormat::Jpeg,
            ),
            Self::nasa_trek(
                "wac_farside",
                "WAC Farside Mosaic",
                "WAC Farside mosaic",
                WAC_MOSAIC,
                7,
                TileFormat::Jpeg,
            ),
            Self::nasa_trek(
                "wac_color",
                "WAC Color Mosaic",
                "LROC WAC Color Mosaic",
                "LRO_WAC_Color_Mosaic_Global_303ppd",
                5,
                TileFormat::Jpeg,
            ),
            Self::nasa_trek(
                "lola_color",
                "LOLA Color Shaded Relief",
                "LOLA elevation with color coding",
                "LRO_LOLA_ClrShade_Global_128ppd_v06",
                6,
                TileFormat::Png,
            ),
            Self::nasa_trek(
                "lola_shade",
                "LOLA Shaded Relief",
                "LOLA elevation shaded relief",
                "LRO_LOLA_Shade_Global_128ppd_v04",
                6,
                TileFormat::Png,
            ),
            Self::nasa_trek(
                "kaguya_morning",
                "Kaguya Morning",
                "Kaguya Terrain Camera morning mosaic",
                "Kaguya_TCMorningMap_Global_256ppd",
                6,
                TileFormat::Jpeg,
            ),
            Self::nasa_trek(
                "kaguya_evening",
                "Kaguya Evening",
                "Kaguya Terrain Camera evening mosaic",
                "Kaguya_TCEveningMap_Global_256ppd",
                6,
                TileFormat::Jpeg,
            ),
        ]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                cors_origin: None,
            },
            tiles: TileConfig {
                tiles_dir: PathBuf::from("tiles"),
                tile_size: 256,
                memory_cache_capacity: 200,
                http_cache_control: "public, max-age=86400".to_string(),
                codec_timeout_ms: 10_000,
            },
            upstream: UpstreamConfig {
                timeout_secs: 30,
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                    .to_string(),
                referer: "https://trek.nasa.gov/".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
                include_location: false,
            },
            products: ProductConfig::default_catalog(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> AppResult<()> {
        if self.tiles.tiles_dir.as_os_str().is_empty() {
            return Err(AppError::ConfigError {
                message: "tiles_dir cannot be empty".to_string(),
            });
        }

        if !(16..=4096).contains(&self.tiles.tile_size) {
            return Err(AppError::ConfigError {
                message: "tile_size must be between 16 and 4096".to_string(),
            });
        }

        if self.tiles.memory_cache_capacity == 0 {
            return Err(AppError::ConfigError {
                message: "memory_cache_capacity must be greater than 0".to_string(),
            });
        }

        if self.tiles.http_cache_control.trim().is_empty() {
            return Err(AppError::ConfigError {
                message: "http_cache_control cannot be empty".to_string(),
            });
        }

        if self.tiles.codec_timeout_ms == 0 {
            return Err(AppError::ConfigError {
                message: "codec_timeout_ms must be greater than 0".to_string(),
            });
        }

        if self.upstream.timeout_secs == 0 {
            return Err(AppError::ConfigError {
                message: "upstream timeout_secs must be greater than 0".to_string(),
            });
        }

        if self.upstream.user_agent.trim().is_empty() {
            return Err(AppError::ConfigError {
                message: "upstream user_agent cannot be empty".to_string(),
            });
        }

        if self.products.is_empty() {
            return Err(AppError::ConfigError {
                message: "at least one product must be configured".to_string(),
            });
        }

        ProductRegistry::from_configs(&self.products)?;

        Ok(())
    }

    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
