pub mod error;
pub mod fetch;
pub mod prefetch;
pub mod product;
pub mod tile;
