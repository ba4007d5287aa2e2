mod placeholder;
pub mod tile_codec_image;
