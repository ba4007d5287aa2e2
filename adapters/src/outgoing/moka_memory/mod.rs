pub mod memory_cache_moka;
