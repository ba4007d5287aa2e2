pub mod codec_offload;
pub mod image_codec;
pub mod memory_cache;
pub mod task_spawn;
pub mod tile_store;
pub mod upstream;
