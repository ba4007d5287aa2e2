pub mod fetcher;
pub mod gateway;
pub mod resolver;
pub mod service;
