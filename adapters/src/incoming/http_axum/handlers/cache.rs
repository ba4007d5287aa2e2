use axum::{
    Json,
    extract::{Path, State},
};

use crate::incoming::http_axum::{dto::responses::CacheClearedResponse, error_mapper::HttpError};
use crate::shared::app_state::AppState;
use lunar_tiles_application::ports::incoming::cache::CacheMaintenanceUseCase;

#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::common_responses::{
    InternalServerErrorResponse, NotFoundResponse,
};

#[cfg_attr(feature = "docs", utoipa::path(
    delete,
    path = "/cache/{product}",
    params(("product" = String, Path, description = "Product id")),
    responses(
        (status = 200, body = CacheClearedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "cache",
    summary = "Clear product cache",
    description = "Delete every cached tile of the product from disk and memory.",
    operation_id = "clear_cache"
))]
pub async fn clear_cache(
    Path(product): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CacheClearedResponse>, HttpError> {
    let cache_uc: &dyn CacheMaintenanceUseCase = &*state.cache_service;
    let cleared = cache_uc
        .clear_product_cache(&product)
        .await
        .map_err(HttpError)?;

    Ok(Json(CacheClearedResponse::from(cleared)))
}
