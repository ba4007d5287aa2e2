use axum::{
    Json,
    http::{
        HeaderMap, HeaderName, HeaderValue, StatusCode,
        header::{CACHE_CONTROL, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;
#[cfg(feature = "docs")]
use utoipa::{ToResponse, ToSchema};
use uuid::Uuid;

use domain::product::TileFormat;
use lunar_tiles_application::{
    cache::service::ClearedCache, catalog::service::ProductSummary,
    prefetch::service::PrefetchTicket, tiles::service::TileResponse,
};

pub const SERVICE_NAME: &str = "LROC WMTS Tile Server";
pub const SOURCE_LABEL: &str = "LROC WMTS";
pub const DATA_SOURCE: &str = "https://trek.nasa.gov/moon/";

pub static TILE_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-tile-source");

const PLACEHOLDER_CACHE_CONTROL: &str = "no-store";

#[cfg_attr(feature = "docs", derive(ToResponse))]
#[cfg_attr(feature = "docs", response(
    description = "Encoded tile image, or a rendered placeholder when upstream has no data",
    content_type = "image/jpeg",
    headers(
        ("Cache-Control" = String),
        ("X-Tile-Source" = String, description = "memory, disk, upstream or placeholder")
    )
))]
pub struct TileImageResponse {
    pub data: Vec<u8>,
    pub format: TileFormat,
    pub source: &'static str,
    pub cache_control: String,
}

impl TileImageResponse {
    /// Placeholders are never cached by clients so the real tile shows up once available.
    #[must_use]
    pub fn from_tile(tile: TileResponse, cache_control: &str) -> Self {
        let cache_control = if tile.source.is_placeholder() {
            PLACEHOLDER_CACHE_CONTROL.to_string()
        } else {
            cache_control.to_string()
        };
        Self {
            data: tile.bytes,
            format: tile.format,
            source: tile.source.as_str(),
            cache_control,
        }
    }
}

impl IntoResponse for TileImageResponse {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(self.format.mime_type()),
        );
        if let Ok(cache_control_value) = HeaderValue::from_str(&self.cache_control) {
            headers.insert(CACHE_CONTROL, cache_control_value);
        }
        headers.insert(
            TILE_SOURCE_HEADER.clone(),
            HeaderValue::from_static(self.source),
        );
        (headers, self.data).into_response()
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Product metadata with live cache statistics",
    example = json!({
        "id": "wac_global",
        "name": "LROC WAC Global Mosaic",
        "description": "Wide Angle Camera global mosaic, 100 m/px",
        "layer": "LRO_WAC_Mosaic_Global_303ppd_v02",
        "max_zoom": 8,
        "format": "jpg",
        "cached_tiles": 25,
        "cache_size_bytes": 512_000
    })
))]
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub layer: String,
    pub max_zoom: u8,
    pub format: String,
    pub cached_tiles: u64,
    pub cache_size_bytes: u64,
}

impl From<ProductSummary> for ProductResponse {
    fn from(summary: ProductSummary) -> Self {
        let ProductSummary { product, stats } = summary;
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            layer: product.layer,
            max_zoom: product.max_zoom,
            format: product.format.extension().to_string(),
            cached_tiles: stats.tile_count,
            cache_size_bytes: stats.total_bytes,
        }
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub source: &'static str,
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(description = "Detailed product information"))]
#[derive(Debug, Clone, Serialize)]
pub struct ProductInfoResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub cache_size_mb: f64,
    pub tile_size: u32,
    pub source: &'static str,
}

impl ProductInfoResponse {
    #[must_use]
    pub fn new(summary: ProductSummary, tile_size: u32) -> Self {
        let cache_size_mb = summary.stats.size_mb();
        Self {
            product: summary.into(),
            cache_size_mb,
            tile_size,
            source: SOURCE_LABEL,
        }
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
pub struct RegionResponse {
    #[cfg_attr(feature = "docs", schema(example = "0-4"))]
    pub rows: String,
    #[cfg_attr(feature = "docs", schema(example = "0-4"))]
    pub cols: String,
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Prefetch job accepted and running in the background",
    example = json!({
        "message": "Caching 25 tiles in background",
        "job_id": "550e8400-e29b-41d4-a716-446655440000",
        "product": "wac_global",
        "product_name": "LROC WAC Global Mosaic",
        "zoom": 2,
        "region": { "rows": "0-4", "cols": "0-4" },
        "total_tiles": 25,
        "status": "Processing in background - check server logs for progress"
    })
))]
#[derive(Debug, Clone, Serialize)]
pub struct PrefetchAcceptedResponse {
    pub message: String,
    pub job_id: Uuid,
    pub product: String,
    pub product_name: String,
    pub zoom: u8,
    pub region: RegionResponse,
    pub total_tiles: u64,
    pub status: &'static str,
}

impl From<PrefetchTicket> for PrefetchAcceptedResponse {
    fn from(ticket: PrefetchTicket) -> Self {
        Self {
            message: format!("Caching {} tiles in background", ticket.total_tiles),
            job_id: ticket.job_id,
            product: ticket.product_id.to_string(),
            product_name: ticket.product_name,
            zoom: ticket.region.zoom,
            region: RegionResponse {
                rows: ticket.region.rows.to_string(),
                cols: ticket.region.cols.to_string(),
            },
            total_tiles: ticket.total_tiles,
            status: "Processing in background - check server logs for progress",
        }
    }
}

impl IntoResponse for PrefetchAcceptedResponse {
    fn into_response(self) -> Response {
        (StatusCode::ACCEPTED, Json(self)).into_response()
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
pub struct CacheClearedResponse {
    pub message: String,
    pub product_name: String,
    pub tiles_deleted: u64,
}

impl From<ClearedCache> for CacheClearedResponse {
    fn from(cleared: ClearedCache) -> Self {
        Self {
            message: format!("Cache cleared for {}", cleared.product_id),
            product_name: cleared.product_name,
            tiles_deleted: cleared.tiles_deleted,
        }
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub data_source: &'static str,
    pub memory_cache_entries: u64,
    pub timestamp: String,
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
pub struct EndpointIndex {
    pub products: &'static str,
    pub tile: &'static str,
    pub generate: &'static str,
    pub info: &'static str,
    pub clear: &'static str,
    pub health: &'static str,
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfoResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: EndpointIndex,
    pub data_source: &'static str,
    pub products: usize,
}
