pub mod fs_tokio;
pub mod http_reqwest;
pub mod image_rs;
pub mod moka_memory;
pub mod tokio_spawn;
