use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::incoming::http_axum::{
    dto::responses::TileImageResponse,
    error_mapper::HttpError,
    extractors::{TilePath, extract_tile_coordinates},
};
use crate::shared::app_state::AppState;
use lunar_tiles_application::ports::incoming::{
    catalog::ProductCatalogUseCase, tiles::TileQueryUseCase,
};

#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::common_responses::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, ValidationErrorResponse,
};

#[cfg_attr(feature = "docs", utoipa::path(
    get,
    path = "/tile/{product}/{zoom}/{row}/{col}",
    params(
        ("product" = String, Path, description = "Product id, e.g. wac_global"),
        ("zoom" = u8, Path, description = "Zoom level, 0 to the product's max zoom"),
        ("row" = u32, Path, description = "WMTS tile row"),
        ("col" = u32, Path, description = "WMTS tile column")
    ),
    responses(
        (status = 200, response = TileImageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "tiles",
    summary = "Get tile image",
    description = "Serve a tile from the memory or disk cache, fetching it upstream on a miss. When upstream has no usable tile a dark placeholder is returned instead of an error.",
    operation_id = "get_tile"
))]
pub async fn serve_tile(
    Path((product, zoom, row, col)): TilePath,
    State(state): State<AppState>,
) -> Result<Response, HttpError> {
    let catalog_uc: &dyn ProductCatalogUseCase = &*state.catalog_service;
    let product = catalog_uc.find_product(&product).map_err(HttpError)?;
    let coords = extract_tile_coordinates(&product, &zoom, &row, &col)?;

    let tile_query_uc: &dyn TileQueryUseCase = &*state.tile_query_service;
    let tile = tile_query_uc
        .get_tile(product.id.as_str(), coords.zoom, coords.row, coords.col)
        .await
        .map_err(HttpError)?;

    Ok(TileImageResponse::from_tile(tile, &state.config.tiles.http_cache_control).into_response())
}
