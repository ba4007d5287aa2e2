use domain::{
    product::TileFormat,
    tile::{DecodedTile, TileAddress},
};
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, RgbImage, RgbaImage,
    codecs::{
        jpeg::JpegEncoder,
        png::{CompressionType, FilterType, PngEncoder},
    },
};
use lunar_tiles_application::{
    error::{AppError, AppResult},
    ports::outgoing::image_codec::TileCodecPort,
};
use tracing::{debug, instrument};

use super::placeholder;

const JPEG_QUALITY: u8 = 90;

#[derive(Copy, Clone)]
pub struct ImageTileCodecConfig {
    pub tile_size: u32,
}

/// JPEG/PNG codec backed by the `image` crate.
#[derive(Clone)]
pub struct ImageTileCodecAdapter {
    tile_size: u32,
}

impl ImageTileCodecAdapter {
    pub fn new(config: ImageTileCodecConfig) -> Self {
        Self {
            tile_size: config.tile_size,
        }
    }

    fn encode_rgb(image: &RgbImage, format: TileFormat) -> AppResult<Vec<u8>> {
        let (width, height) = image.dimensions();
        Self::write(image.as_raw(), width, height, ExtendedColorType::Rgb8, format)
    }

    fn write(
        pixels: &[u8],
        width: u32,
        height: u32,
        color: ExtendedColorType,
        format: TileFormat,
    ) -> AppResult<Vec<u8>> {
        let mut out = Vec::new();
        let result = match format {
            TileFormat::Jpeg => JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
                .write_image(pixels, width, height, color),
            TileFormat::Png => {
                PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive)
                    .write_image(pixels, width, height, color)
            }
        };
        result.map_err(|e| AppError::CodecError {
            message: format!("Failed to encode {format}: {e}"),
        })?;

        if out.is_empty() {
            return Err(AppError::CodecError {
                message: format!("{format} encoding produced empty output"),
            });
        }
        Ok(out)
    }
}

impl TileCodecPort for ImageTileCodecAdapter {
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    fn decode(&self, data: &[u8]) -> AppResult<DecodedTile> {
        let decoded = image::load_from_memory(data).map_err(|e| AppError::CodecError {
            message: format!("Failed to decode upstream image: {e}"),
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        debug!("Decoded {}x{} tile", width, height);

        DecodedTile::new(width, height, rgba.into_raw()).map_err(|e| AppError::CodecError {
            message: e.to_string(),
        })
    }

    /// JPEG drops alpha; PNG keeps it only when some pixel is translucent.
    #[instrument(skip(self, tile), fields(width = tile.width(), height = tile.height()))]
    fn encode(&self, tile: &DecodedTile, format: TileFormat) -> AppResult<Vec<u8>> {
        let (width, height) = (tile.width(), tile.height());

        if format == TileFormat::Png && !tile.is_opaque() {
            return Self::write(tile.rgba(), width, height, ExtendedColorType::Rgba8, format);
        }

        let rgba = RgbaImage::from_raw(width, height, tile.rgba().to_vec()).ok_or_else(|| {
            AppError::CodecError {
                message: format!("Pixel buffer does not match {width}x{height}"),
            }
        })?;
        let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();
        Self::encode_rgb(&rgb, format)
    }

    fn render_placeholder(&self, address: &TileAddress, format: TileFormat) -> AppResult<Vec<u8>> {
        let canvas = placeholder::render(address, self.tile_size);
        Self::encode_rgb(&canvas, format)
    }
}
