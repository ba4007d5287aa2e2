use crate::incoming::http_axum::{dto, handlers};
use dto::common_responses::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, ValidationErrorResponse,
};
use dto::responses::{
    CacheClearedResponse, EndpointIndex, HealthResponse, PrefetchAcceptedResponse,
    ProductInfoResponse, ProductListResponse, ProductResponse, RegionResponse,
    ServiceInfoResponse, TileImageResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::service_info,
        handlers::health::health_check,
        handlers::products::list_products,
        handlers::products::product_info,
        handlers::tiles::serve_tile,
        handlers::prefetch::generate_tiles,
        handlers::cache::clear_cache,
    ),
    components(
        schemas(
            ProductResponse,
            ProductListResponse,
            ProductInfoResponse,
            RegionResponse,
            PrefetchAcceptedResponse,
            CacheClearedResponse,
            HealthResponse,
            EndpointIndex,
            ServiceInfoResponse
        ),
        responses(
            TileImageResponse,
            BadRequestResponse,
            NotFoundResponse,
            ValidationErrorResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "tiles", description = "Tile serving - cached lunar WMTS tiles with placeholder fallback"),
        (name = "products", description = "Product catalog with live cache statistics"),
        (name = "prefetch", description = "Background prefetching of tile regions into the disk cache"),
        (name = "cache", description = "Cache maintenance"),
        (name = "system", description = "System health and service index")
    ),
    info(
        title = "Lunar Tiles API",
        description = "Caching proxy for NASA lunar WMTS imagery. Tiles are served from an in-memory LRU, then the disk cache, then fetched upstream and persisted; tiles upstream cannot supply are replaced by a rendered placeholder.",
    ),
    servers(
        (url = "http://localhost:8000", description = "Development server"),
    )
)]
pub struct ApiDoc;
