// keep public for OpenAPI docs
pub mod cache;
pub mod health;
pub mod prefetch;
pub mod products;
pub mod tiles;
