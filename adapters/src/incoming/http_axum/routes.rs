use axum::{
    Router,
    routing::{delete, get, post},
};
#[cfg(feature = "docs")]
use utoipa::OpenApi;
#[cfg(feature = "docs")]
use utoipa_swagger_ui::SwaggerUi;

use crate::incoming::http_axum::{
    handlers::{
        cache::clear_cache,
        health::{health_check, service_info},
        prefetch::generate_tiles,
        products::{list_products, product_info},
        tiles::serve_tile,
    },
    router_ext::RouterExt,
};
use crate::shared::app_state::AppState;

#[cfg(feature = "docs")]
use crate::incoming::http_axum::docs::ApiDoc;

pub fn build_application_router() -> Router<AppState> {
    build_core_routes()
        .merge(build_tile_routes())
        .merge(build_maintenance_routes())
        .with_request_id()
}

fn build_core_routes() -> Router<AppState> {
    let router = Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/products", get(list_products))
        .route("/info/{product}", get(product_info));

    #[cfg(feature = "docs")]
    {
        router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
    }

    #[cfg(not(feature = "docs"))]
    {
        router
    }
}

fn build_tile_routes() -> Router<AppState> {
    Router::new().route("/tile/{product}/{zoom}/{row}/{col}", get(serve_tile))
}

fn build_maintenance_routes() -> Router<AppState> {
    Router::new()
        .route("/generate/{product}", post(generate_tiles))
        .route("/cache/{product}", delete(clear_cache))
}
