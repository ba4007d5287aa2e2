use axum::extract::{Path, State};

use crate::incoming::http_axum::{
    dto::responses::PrefetchAcceptedResponse,
    error_mapper::HttpError,
    extractors::{GenerateQuery, extract_generate_query},
};
use crate::shared::app_state::AppState;
use lunar_tiles_application::ports::incoming::{
    catalog::ProductCatalogUseCase, prefetch::PrefetchUseCase,
};

#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::requests::GenerateTilesQuery;

#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::common_responses::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, ValidationErrorResponse,
};

#[cfg_attr(feature = "docs", utoipa::path(
    post,
    path = "/generate/{product}",
    params(
        ("product" = String, Path, description = "Product id"),
        GenerateTilesQuery
    ),
    responses(
        (status = 202, body = PrefetchAcceptedResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "prefetch",
    summary = "Prefetch a region",
    description = "Download every tile of an inclusive row/column rectangle into the disk cache. Runs in the background and returns immediately; progress is reported in the server logs.",
    operation_id = "generate_tiles"
))]
pub async fn generate_tiles(
    Path(product): Path<String>,
    State(state): State<AppState>,
    query: GenerateQuery,
) -> Result<PrefetchAcceptedResponse, HttpError> {
    let catalog_uc: &dyn ProductCatalogUseCase = &*state.catalog_service;
    catalog_uc.find_product(&product).map_err(HttpError)?;
    let region = extract_generate_query(query)?
        .to_region()
        .map_err(HttpError)?;

    let prefetch_uc: &dyn PrefetchUseCase = &*state.prefetch_service;
    let ticket = prefetch_uc
        .schedule_prefetch(&product, region)
        .map_err(HttpError)?;

    Ok(PrefetchAcceptedResponse::from(ticket))
}
