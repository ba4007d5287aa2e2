pub mod cache;
pub mod catalog;
pub mod prefetch;
pub mod tiles;
