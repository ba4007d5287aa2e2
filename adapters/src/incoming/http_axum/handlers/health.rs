use axum::{Json, extract::State};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::incoming::http_axum::dto::responses::{
    DATA_SOURCE, EndpointIndex, HealthResponse, SERVICE_NAME, ServiceInfoResponse,
};
use crate::shared::app_state::AppState;
use lunar_tiles_application::ports::incoming::catalog::ProductCatalogUseCase;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(feature = "docs", utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse,
         example = json!({
             "status": "healthy",
             "service": "LROC WMTS Tile Server",
             "version": "0.1.0",
             "data_source": "https://trek.nasa.gov/moon/",
             "memory_cache_entries": 42,
             "timestamp": "2025-01-01T12:00:00Z"
         })
        )
    ),
    tag = "system",
    summary = "System health check",
    operation_id = "health_check"
))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog_uc: &dyn ProductCatalogUseCase = &*state.catalog_service;
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: VERSION,
        data_source: DATA_SOURCE,
        memory_cache_entries: catalog_uc.memory_cache_entries(),
        timestamp,
    })
}

#[cfg_attr(feature = "docs", utoipa::path(
    get,
    path = "/",
    responses((status = 200, body = ServiceInfoResponse)),
    tag = "system",
    summary = "Service index",
    operation_id = "service_info"
))]
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: SERVICE_NAME,
        version: VERSION,
        description: "Caching proxy for lunar WMTS imagery",
        endpoints: EndpointIndex {
            products: "/products - List available products",
            tile: "/tile/{product}/{zoom}/{row}/{col} - Get a tile",
            generate: "/generate/{product}?zoom=Z&start_row=R&end_row=R&start_col=C&end_col=C - Cache tiles",
            info: "/info/{product} - Product details",
            clear: "/cache/{product} - Clear cache",
            health: "/health - Health check",
        },
        data_source: DATA_SOURCE,
        products: state.config.products.len(),
    })
}
