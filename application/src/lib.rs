#[cfg(any(
    feature = "adapters",
    feature = "axum",
    feature = "reqwest",
    feature = "moka",
    feature = "image"
))]
compile_error!("application must not depend on adapters/framework crates");

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod infrastructure_config;
pub mod ports;
pub mod prefetch;
pub mod products;
pub mod tiles;

#[cfg(test)]
mod test_support;
