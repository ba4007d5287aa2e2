use lunar_tiles_application::infrastructure_config::{Config, TileConfig, UpstreamConfig};
use tracing::info;

pub fn print_api_info(config: &Config) {
    print_api_documentation_info(config);
    print_configuration_info(config);
    print_product_catalog(config);
}

fn print_api_documentation_info(config: &Config) {
    let base_url = format!("http://{}", config.server_address());
    info!("📋 API:");
    info!("  🗺️  Products: {}/products", base_url);
    info!("  🩺 Health: {}/health", base_url);
    if cfg!(feature = "docs") {
        info!("  📖 Swagger UI: {}/docs", base_url);
        info!("  📄 OpenAPI JSON: {}/api-docs/openapi.json", base_url);
    }
}

fn print_configuration_info(config: &Config) {
    info!("⚙️  Configuration:");
    print_tile_configuration(&config.tiles);
    print_upstream_configuration(&config.upstream);
}

fn print_tile_configuration(tiles: &TileConfig) {
    info!("  📁 Tiles directory: {}", tiles.tiles_dir.display());
    info!(
        "  📐 Tile size: {}x{} pixels",
        tiles.tile_size, tiles.tile_size
    );
    info!(
        "  📦 Memory cache: {} tiles (LRU), Cache-Control \"{}\"",
        tiles.memory_cache_capacity, tiles.http_cache_control
    );
}

fn print_upstream_configuration(upstream: &UpstreamConfig) {
    info!(
        "  🌐 Upstream: timeout {}s, referer {}",
        upstream.timeout_secs, upstream.referer
    );
}

fn print_product_catalog(config: &Config) {
    info!("🌕 Available products:");
    for product in &config.products {
        info!(
            "  • {} ({}): {} [max zoom {}, {}]",
            product.name, product.id, product.description, product.max_zoom, product.format
        );
    }
}
