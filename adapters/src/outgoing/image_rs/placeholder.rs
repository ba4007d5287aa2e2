//! Dark "not cached" tile drawn when upstream has nothing usable.

use domain::tile::TileAddress;
use image::{Rgb, RgbImage};

const BACKGROUND: Rgb<u8> = Rgb([20, 20, 25]);
const BORDER: Rgb<u8> = Rgb([60, 60, 70]);
const TEXT: Rgb<u8> = Rgb([120, 120, 130]);

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const SCALE: u32 = 2;
const ADVANCE: u32 = (GLYPH_WIDTH + 1) * SCALE;
const LINE_HEIGHT: u32 = (GLYPH_HEIGHT + 3) * SCALE;

/// 5x7 bitmap rows, most significant of the low five bits is the leftmost column.
fn glyph(c: char) -> [u8; 7] {
    match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        _ => [0x00; 7],
    }
}

fn fill(canvas: &mut RgbImage, x: u32, y: u32, color: Rgb<u8>) {
    if let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
        *pixel = color;
    }
}

fn draw_text(canvas: &mut RgbImage, text: &str, origin_x: u32, origin_y: u32) {
    let mut pen_x = origin_x;
    for c in text.chars() {
        for (row, bits) in (0u32..).zip(glyph(c)) {
            for column in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - column)) == 0 {
                    continue;
                }
                for dy in 0..SCALE {
                    for dx in 0..SCALE {
                        fill(
                            canvas,
                            pen_x + column * SCALE + dx,
                            origin_y + row * SCALE + dy,
                            TEXT,
                        );
                    }
                }
            }
        }
        pen_x += ADVANCE;
    }
}

pub(super) fn render(address: &TileAddress, tile_size: u32) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(tile_size, tile_size, BACKGROUND);
    let last = tile_size.saturating_sub(1);
    for i in 0..tile_size {
        fill(&mut canvas, i, 0, BORDER);
        fill(&mut canvas, i, last, BORDER);
        fill(&mut canvas, 0, i, BORDER);
        fill(&mut canvas, last, i, BORDER);
    }

    let margin_x = tile_size / 8;
    let top = tile_size / 3;
    let lines = [
        format!("Z{}", address.zoom),
        format!("{},{}", address.row, address.col),
        "NOT CACHED".to_string(),
    ];
    for (index, line) in (0u32..).zip(lines.iter()) {
        draw_text(&mut canvas, line, margin_x, top + index * LINE_HEIGHT);
    }
    canvas
}
