use axum::{
    Json,
    extract::{Path, State},
};

use crate::incoming::http_axum::{
    dto::responses::{ProductInfoResponse, ProductListResponse, ProductResponse, SOURCE_LABEL},
    error_mapper::HttpError,
};
use crate::shared::app_state::AppState;
use lunar_tiles_application::ports::incoming::catalog::ProductCatalogUseCase;

#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::common_responses::{
    InternalServerErrorResponse, NotFoundResponse,
};

#[cfg_attr(feature = "docs", utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, body = ProductListResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "products",
    summary = "List products",
    description = "List every configured lunar imagery product with the number of tiles currently cached on disk.",
    operation_id = "list_products"
))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductListResponse>, HttpError> {
    let catalog_uc: &dyn ProductCatalogUseCase = &*state.catalog_service;
    let summaries = catalog_uc.list_products().await.map_err(HttpError)?;

    Ok(Json(ProductListResponse {
        products: summaries.into_iter().map(ProductResponse::from).collect(),
        source: SOURCE_LABEL,
    }))
}

#[cfg_attr(feature = "docs", utoipa::path(
    get,
    path = "/info/{product}",
    params(("product" = String, Path, description = "Product id")),
    responses(
        (status = 200, body = ProductInfoResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "products",
    summary = "Product details",
    description = "Product metadata together with cached tile count and on-disk size.",
    operation_id = "product_info"
))]
pub async fn product_info(
    Path(product): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ProductInfoResponse>, HttpError> {
    let catalog_uc: &dyn ProductCatalogUseCase = &*state.catalog_service;
    let summary = catalog_uc.product_info(&product).await.map_err(HttpError)?;

    Ok(Json(ProductInfoResponse::new(
        summary,
        state.config.tiles.tile_size,
    )))
}
