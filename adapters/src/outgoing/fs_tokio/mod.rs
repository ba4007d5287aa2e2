pub mod tile_store_fs;
